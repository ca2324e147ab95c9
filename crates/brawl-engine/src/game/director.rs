//! Top-level orchestration: owns the session state machine, the active level,
//! the player and the engine context, and runs them in a fixed order each frame.

use crate::api::config::GameConfig;
use crate::api::context::EngineContext;
use crate::api::types::{GameEvent, SoundEvent};
use crate::assets::manifest::SpriteManifest;
use crate::audio::mixer::MusicMixer;
use crate::core::time::{Countdown, FrameClock};
use crate::error::GameError;
use crate::game::layouts::LevelTable;
use crate::game::level::{Level, LevelState};
use crate::game::player::Player;
use crate::game::session::{GameSession, GameState};
use crate::input::{Action, InputState};
use crate::renderer::camera::Camera2D;
use crate::renderer::traits::DrawSurface;
use crate::systems::combat;
use crate::systems::render::{self, FrameView};

pub struct GameDirector {
    config: GameConfig,
    ctx: EngineContext,
    layouts: LevelTable,
    level: Option<Level>,
    player: Option<Player>,
    session: GameSession,
    clock: FrameClock,
    /// Started by any hit on the player; while it runs, commands are ignored
    /// and contact damage is held off.
    input_cooldown: Countdown,
    mixer: MusicMixer,
    manifest: SpriteManifest,
    camera: Camera2D,
}

impl GameDirector {
    pub fn new(config: GameConfig) -> Self {
        let ctx = EngineContext::new(&config.physics);
        Self::with_context(config, ctx)
    }

    /// Build around a prepared context, e.g. one with physics unavailable.
    pub fn with_context(config: GameConfig, ctx: EngineContext) -> Self {
        log::info!(
            "director ready: {} levels, physics {}",
            config.level_count,
            if ctx.physics.is_available() { "on" } else { "off" }
        );
        let mut camera = Camera2D::new(config.world_width, config.world_height);
        camera.set_smoothing(config.camera_smoothing);
        Self {
            clock: FrameClock::new(config.max_frame_dt),
            mixer: MusicMixer::new(config.music_fade),
            camera,
            ctx,
            layouts: LevelTable::new(),
            level: None,
            player: None,
            session: GameSession::new(),
            input_cooldown: Countdown::idle(),
            manifest: SpriteManifest::new(),
            config,
        }
    }

    pub fn set_layouts(&mut self, layouts: LevelTable) {
        self.layouts = layouts;
    }

    pub fn set_manifest(&mut self, manifest: SpriteManifest) {
        self.manifest = manifest;
    }

    // -- Frame --

    /// Advance one frame: input, gameplay, physics, collisions, audio.
    pub fn frame(&mut self, raw_dt: f32, input: &InputState) {
        let dt = self.clock.advance(raw_dt);
        if self.session.state == GameState::Playing {
            self.session.play_time += dt;
        }
        self.ctx.clear_frame_data();

        let transitioned = self.dispatch_input(dt, input);
        if !transitioned && self.session.state == GameState::Playing {
            self.step_gameplay(dt);
        }
        self.mixer.update(dt);
    }

    /// Route input for the current state only. Returns true when the input
    /// caused a transition; gameplay does not advance on that frame.
    fn dispatch_input(&mut self, dt: f32, input: &InputState) -> bool {
        match self.session.state {
            GameState::Menu if input.just_pressed(Action::Confirm) => {
                self.session.restart_run();
                self.enter_level(0);
            }
            GameState::Playing | GameState::Paused if input.just_pressed(Action::Restart) => {
                self.restart_level();
            }
            GameState::Playing if input.just_pressed(Action::Pause) => {
                self.set_state(GameState::Paused);
            }
            GameState::Playing => {
                self.input_cooldown.tick(dt);
                self.command_player(dt, input);
                return false;
            }
            GameState::Paused if input.just_pressed(Action::Pause) => {
                self.set_state(GameState::Playing);
            }
            GameState::LevelCompleted if input.just_pressed(Action::Confirm) => {
                self.advance_level();
            }
            GameState::GameOver | GameState::Victory if input.just_pressed(Action::Confirm) => {
                self.return_to_menu();
            }
            _ => return false,
        }
        true
    }

    fn command_player(&mut self, dt: f32, input: &InputState) {
        if self.input_cooldown.is_running() {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let physics = &mut self.ctx.physics;
        player.move_with_physics(physics, input.horizontal(), dt);
        player.clamp_horizontal_speed(physics);

        if input.just_pressed(Action::Jump) && player.jump(physics) {
            self.ctx.emit_sound(SoundEvent::JUMP);
        }
        if input.just_pressed(Action::Attack) && player.attack() {
            self.ctx.emit_sound(SoundEvent::SWING);
            if let Some(level) = self.level.as_mut() {
                let hit = combat::resolve_player_attack(player, level, &mut self.ctx);
                if let Some((id, dealt)) = hit {
                    log::debug!("player hit {:?} for {}", id, dealt);
                }
            }
        }
    }

    fn step_gameplay(&mut self, dt: f32) {
        let (Some(level), Some(player)) = (self.level.as_mut(), self.player.as_mut()) else {
            return;
        };
        let ctx = &mut self.ctx;

        // Gameplay and AI.
        player.update(dt, &ctx.physics);
        player.tick_animation(dt);
        let tick = level.update(ctx, dt, player.actor.pos);
        combat::strike_player(
            player,
            tick.damage,
            &mut self.input_cooldown,
            self.config.input_cooldown,
            ctx,
        );
        if tick.score > 0 {
            self.session.add_score(tick.score);
            let score = self.session.score as f32;
            ctx.emit_event(GameEvent::new(GameEvent::SCORE, score, 0.0, 0.0));
        }

        // Physics, then positions back out of it.
        ctx.physics.step(dt);
        player.actor.sync_from_physics(&ctx.physics);
        level.sync_from_physics(&ctx.physics);
        let bounds = level.bounds();
        let clamped = bounds.clamp_center(player.actor.pos, player.actor.size);
        if clamped != player.actor.pos {
            player.actor.teleport(&mut ctx.physics, clamped);
        }

        // Collision resolution.
        combat::resolve_contacts(
            player,
            level,
            self.config.contact_radius,
            &mut self.input_cooldown,
            self.config.input_cooldown,
            ctx,
        );
        self.camera.follow(player.actor.pos, dt);

        // Transitions.
        if !player.is_alive() {
            level.fail();
            ctx.emit_sound(SoundEvent::GAME_OVER);
            self.set_state(GameState::GameOver);
        } else if level.state() == LevelState::Completed {
            self.session.add_score(self.config.level_complete_bonus);
            self.session.levels_completed += 1;
            self.ctx.emit_sound(SoundEvent::LEVEL_CLEAR);
            let score = self.session.score as f32;
            self.ctx.emit_event(GameEvent::new(GameEvent::SCORE, score, 0.0, 0.0));
            self.set_state(GameState::LevelCompleted);
        }
    }

    // -- Transitions --

    fn set_state(&mut self, state: GameState) {
        if self.session.state == state {
            return;
        }
        log::info!("game state {:?} -> {:?}", self.session.state, state);
        self.session.state = state;
        self.mixer.on_state(state);
        self.ctx
            .emit_event(GameEvent::new(GameEvent::STATE_CHANGED, state.code() as f32, 0.0, 0.0));
    }

    /// Load level `index` (0-based), respawn the player there and start playing.
    /// Any failure is logged and ends the run in `GameOver`.
    pub fn start_level(&mut self, index: usize) -> Result<(), GameError> {
        match self.try_start_level(index) {
            Ok(()) => {
                self.set_state(GameState::Playing);
                Ok(())
            }
            Err(e) => {
                log::error!("cannot start level: {}", e);
                self.ctx.emit_sound(SoundEvent::GAME_OVER);
                self.set_state(GameState::GameOver);
                Err(e)
            }
        }
    }

    /// `start_level` for input transitions, where a failure has already been
    /// turned into `GameOver` and there is no caller to report to.
    fn enter_level(&mut self, index: usize) {
        if let Err(e) = self.start_level(index) {
            log::debug!("level {} not entered: {}", index, e);
        }
    }

    fn try_start_level(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.config.level_count {
            return Err(GameError::InvalidLevel {
                index,
                count: self.config.level_count,
            });
        }
        if let Some(mut old) = self.level.take() {
            old.unload_level(&mut self.ctx);
        }

        let ordinal = index as u32 + 1;
        let mut level = Level::new(ordinal, self.layouts.layout_for(ordinal));
        level.load_level(&mut self.ctx)?;

        self.session.level_index = index;
        self.input_cooldown.clear();
        self.place_player(level.player_spawn());
        self.camera.set_bounds(level.bounds());
        if let Some(player) = &self.player {
            self.camera.look_at(player.actor.pos);
        }
        self.ctx.emit_event(GameEvent::new(
            GameEvent::LEVEL_STARTED,
            ordinal as f32,
            level.total_enemies() as f32,
            0.0,
        ));
        self.level = Some(level);
        Ok(())
    }

    /// Spawn the player on first use, otherwise heal and move it.
    fn place_player(&mut self, spawn: glam::Vec2) {
        match self.player.as_mut() {
            Some(player) => player.respawn(&mut self.ctx.physics, spawn),
            None => {
                let id = self.ctx.next_id();
                self.player = Some(Player::spawn(
                    id,
                    spawn,
                    self.config.player.clone(),
                    &mut self.ctx.physics,
                ));
            }
        }
        if let Some(player) = &self.player {
            self.ctx.emit_event(GameEvent::new(
                GameEvent::PLAYER_HEALTH,
                player.actor.health() as f32,
                player.actor.max_health() as f32,
                0.0,
            ));
        }
    }

    /// Reset the current level and put the player back at its start.
    pub fn restart_level(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if let Err(e) = level.reset_level(&mut self.ctx) {
            log::error!("cannot restart level: {}", e);
            self.set_state(GameState::GameOver);
            return;
        }
        log::info!("level {} restarted", level.ordinal());
        let spawn = level.player_spawn();
        self.input_cooldown.clear();
        self.place_player(spawn);
        self.set_state(GameState::Playing);
    }

    fn advance_level(&mut self) {
        let next = self.session.level_index + 1;
        if next >= self.config.level_count {
            self.teardown_level();
            self.set_state(GameState::Victory);
        } else {
            self.enter_level(next);
        }
    }

    fn return_to_menu(&mut self) {
        self.teardown_level();
        if let Some(mut player) = self.player.take() {
            player.actor.detach_body(&mut self.ctx.physics);
        }
        self.set_state(GameState::Menu);
    }

    fn teardown_level(&mut self) {
        if let Some(mut level) = self.level.take() {
            level.unload_level(&mut self.ctx);
        }
    }

    // -- Rendering --

    /// Describe the current frame to `surface`.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        let view = FrameView {
            session: &self.session,
            level: self.level.as_ref(),
            player: self.player.as_ref(),
            camera: &self.camera,
        };
        render::render_frame(surface, &view, &mut self.manifest);
    }

    // -- Accessors --

    pub fn state(&self) -> GameState {
        self.session.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mixer(&self) -> &MusicMixer {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut MusicMixer {
        &mut self.mixer
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn input_cooldown(&self) -> f32 {
        self.input_cooldown.remaining()
    }
}
