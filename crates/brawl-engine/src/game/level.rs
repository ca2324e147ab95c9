use glam::Vec2;

use crate::api::context::EngineContext;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::geometry::Rect;
use crate::core::physics::PhysicsWorld;
use crate::error::GameError;
use crate::game::enemy::{Enemy, EnemyIntent, EnemyKind};
use crate::game::layouts::{LevelLayout, ObstacleKind};
use crate::game::roster::Roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Loading,
    Active,
    Completed,
    Failed,
}

/// A one-shot scheduled enemy. `spawned` only goes false→true within a load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec2,
    pub kind: EnemyKind,
    pub time: f32,
    pub spawned: bool,
}

/// Static level geometry, optionally backed by a fixed body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: EntityId,
    pub rect: Rect,
    pub kind: ObstacleKind,
    pub has_body: bool,
}

/// What happened during one `Level::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelTick {
    /// Damage from enemy attacks that landed this frame.
    pub damage: i32,
    /// Score for enemies swept this frame.
    pub score: u32,
    pub kills: u32,
    pub spawned: u32,
}

/// One playable level: its enemies, spawn schedule and static geometry.
pub struct Level {
    ordinal: u32,
    layout: LevelLayout,
    state: LevelState,
    loaded: bool,
    elapsed: f32,
    roster: Roster,
    spawn_points: Vec<SpawnPoint>,
    obstacles: Vec<Obstacle>,
    total_enemies: u32,
    enemies_killed: u32,
}

impl Level {
    /// A level in `Loading` state. Nothing touches physics until `load_level`.
    pub fn new(ordinal: u32, layout: LevelLayout) -> Self {
        Self {
            ordinal,
            layout,
            state: LevelState::Loading,
            loaded: false,
            elapsed: 0.0,
            roster: Roster::new(),
            spawn_points: Vec::new(),
            obstacles: Vec::new(),
            total_enemies: 0,
            enemies_killed: 0,
        }
    }

    // -- Lifecycle --

    /// Apply the layout and go Active. Does nothing if already loaded.
    pub fn load_level(&mut self, ctx: &mut EngineContext) -> Result<(), GameError> {
        if self.loaded {
            return Ok(());
        }
        self.layout.validate(self.ordinal)?;

        self.elapsed = 0.0;
        self.enemies_killed = 0;
        self.roster.clear(&mut ctx.physics);
        self.clear_obstacles(&mut ctx.physics);

        self.spawn_points = self
            .layout
            .spawns
            .iter()
            .map(|s| SpawnPoint {
                position: s.position,
                kind: s.kind,
                time: s.time,
                spawned: false,
            })
            .collect();
        self.total_enemies = self.spawn_points.len() as u32;

        for spec in &self.layout.obstacles {
            let id = ctx.next_id();
            let body = match spec.kind {
                ObstacleKind::Platform => ctx.physics.create_platform(spec.rect, id),
                ObstacleKind::Wall => ctx.physics.create_wall(spec.rect, id),
            };
            self.obstacles.push(Obstacle {
                id,
                rect: spec.rect,
                kind: spec.kind,
                has_body: body.is_some(),
            });
        }

        self.loaded = true;
        self.state = LevelState::Active;
        log::info!(
            "level {} \"{}\" loaded: {} spawns, {} obstacles",
            self.ordinal,
            self.layout.name,
            self.spawn_points.len(),
            self.obstacles.len()
        );
        Ok(())
    }

    /// Destroy every enemy and obstacle body and return to `Loading`.
    pub fn unload_level(&mut self, ctx: &mut EngineContext) {
        self.roster.clear(&mut ctx.physics);
        self.clear_obstacles(&mut ctx.physics);
        self.spawn_points.clear();
        self.elapsed = 0.0;
        self.loaded = false;
        self.state = LevelState::Loading;
    }

    pub fn reset_level(&mut self, ctx: &mut EngineContext) -> Result<(), GameError> {
        self.unload_level(ctx);
        self.load_level(ctx)
    }

    fn clear_obstacles(&mut self, physics: &mut PhysicsWorld) {
        for obstacle in self.obstacles.drain(..) {
            if obstacle.has_body {
                physics.destroy_body(obstacle.id);
            }
        }
    }

    /// Player died: Active → Failed.
    pub fn fail(&mut self) {
        if self.state == LevelState::Active {
            self.state = LevelState::Failed;
            log::info!("level {} failed", self.ordinal);
        }
    }

    // -- Per-frame --

    /// Advance spawns, AI and the dead sweep. Only runs while Active.
    pub fn update(&mut self, ctx: &mut EngineContext, dt: f32, player_pos: Vec2) -> LevelTick {
        let mut tick = LevelTick::default();
        if self.state != LevelState::Active {
            return tick;
        }
        self.elapsed += dt;

        for point in self.spawn_points.iter_mut() {
            if point.spawned || self.elapsed < point.time {
                continue;
            }
            point.spawned = true;
            let id = ctx.next_id();
            let enemy = Enemy::spawn(id, point.kind, point.position, &mut ctx.physics);
            log::debug!("spawned {:?} {:?} at {:?}", point.kind, id, point.position);
            self.roster.spawn(enemy);
            tick.spawned += 1;
        }

        for enemy in self.roster.iter_mut() {
            let intent = enemy.think(dt, player_pos);
            if let EnemyIntent::Attack(damage) = intent {
                tick.damage += damage;
            }
            enemy.apply(intent, dt, &mut ctx.physics);
            enemy.tick_animation(dt);
        }

        for enemy in self.roster.sweep_dead(&mut ctx.physics) {
            self.enemies_killed = (self.enemies_killed + 1).min(self.total_enemies);
            tick.kills += 1;
            tick.score += enemy.profile.score;
            log::debug!("{:?} {:?} removed", enemy.kind, enemy.id());
            ctx.emit_sound(SoundEvent::ENEMY_DOWN);
            ctx.emit_event(GameEvent::new(
                GameEvent::ENEMY_KILLED,
                self.enemies_killed as f32,
                self.total_enemies as f32,
                0.0,
            ));
        }

        if self.all_spawned() && self.roster.is_empty() {
            self.state = LevelState::Completed;
            log::info!(
                "level {} completed in {:.1}s ({} kills)",
                self.ordinal,
                self.elapsed,
                self.enemies_killed
            );
        }
        tick
    }

    /// Copy body positions and ground contact into enemies after the physics
    /// step. Body-less enemies are kept inside the level and count as grounded.
    pub fn sync_from_physics(&mut self, physics: &PhysicsWorld) {
        let bounds = self.layout.bounds;
        for enemy in self.roster.iter_mut() {
            if enemy.actor.body.is_some() {
                enemy.actor.sync_from_physics(physics);
                enemy.actor.grounded = physics.is_body_on_ground(enemy.id());
            } else {
                enemy.actor.pos = bounds.clamp_center(enemy.actor.pos, enemy.actor.size);
                enemy.actor.grounded = true;
            }
        }
    }

    // -- Queries --

    /// Nearest living enemy within `max_range` (inclusive; non-positive = unbounded).
    pub fn closest_enemy(&self, pos: Vec2, max_range: f32) -> Option<&Enemy> {
        self.roster.closest_to(pos, max_range)
    }

    pub fn closest_enemy_mut(&mut self, pos: Vec2, max_range: f32) -> Option<&mut Enemy> {
        self.roster.closest_to_mut(pos, max_range)
    }

    pub fn is_position_in_bounds(&self, p: Vec2) -> bool {
        self.layout.bounds.contains(p)
    }

    pub fn is_position_blocked(&self, p: Vec2) -> bool {
        self.obstacles.iter().any(|o| o.rect.contains(p))
    }

    pub fn all_spawned(&self) -> bool {
        self.spawn_points.iter().all(|s| s.spawned)
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn name(&self) -> &str {
        &self.layout.name
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn bounds(&self) -> Rect {
        self.layout.bounds
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.layout.player_spawn
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn spawn_points(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn total_enemies(&self) -> u32 {
        self.total_enemies
    }

    pub fn enemies_killed(&self) -> u32 {
        self.enemies_killed
    }
}
