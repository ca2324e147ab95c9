use std::collections::HashMap;

use glam::Vec2;

use crate::api::config::PlayerTuning;
use crate::api::types::EntityId;
use crate::components::actor::{Actor, Facing};
use crate::components::animation::{AnimationDef, Animator};
use crate::core::physics::{BodyRole, PhysicsWorld};
use crate::core::time::Countdown;

/// Horizontal speed (px/s) below which a grounded player counts as standing.
const RUN_THRESHOLD: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
    Falling,
    Attacking,
    Hurt,
    Dead,
}

/// The player character.
///
/// State comes from two places: explicit commands (`jump`, `attack`,
/// `move_with_physics`) and transitions derived from the body every frame in
/// `update`. Hurt outranks both: while it runs, commands are ignored.
pub struct Player {
    pub actor: Actor,
    pub state: PlayerState,
    tuning: PlayerTuning,
    hurt: Countdown,
    attack: Countdown,
    /// Velocity of direct movement this frame, used when there is no body.
    fallback_velocity: Vec2,
    animator: Animator<PlayerState>,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, tuning: PlayerTuning) -> Self {
        let actor = Actor::new(id, tuning.max_health)
            .with_pos(pos)
            .with_size(tuning.size)
            .with_speed(tuning.speed);
        let mut animator = Animator::new(player_clips());
        animator.play(PlayerState::Idle);

        Self {
            actor,
            state: PlayerState::Idle,
            tuning,
            hurt: Countdown::idle(),
            attack: Countdown::idle(),
            fallback_velocity: Vec2::ZERO,
            animator,
        }
    }

    /// Create the player and its physics body together.
    pub fn spawn(
        id: EntityId,
        pos: Vec2,
        tuning: PlayerTuning,
        physics: &mut PhysicsWorld,
    ) -> Self {
        let mut player = Self::new(id, pos, tuning);
        player.actor.attach_body(physics, BodyRole::Player);
        if player.actor.body.is_none() {
            player.actor.grounded = true;
        }
        player
    }

    pub fn id(&self) -> EntityId {
        self.actor.id
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    pub fn is_grounded(&self) -> bool {
        self.actor.grounded
    }

    /// Inside the post-hit window.
    pub fn is_hurt(&self) -> bool {
        self.hurt.is_running()
    }

    pub fn frame(&self) -> Option<(f32, f32)> {
        self.animator.current_frame()
    }

    fn accepts_commands(&self) -> bool {
        self.is_alive() && !self.is_hurt()
    }

    // -- Commands --

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self, physics: &mut PhysicsWorld) -> bool {
        if !self.accepts_commands() || !self.actor.grounded {
            return false;
        }
        physics.apply_impulse(self.actor.id, Vec2::new(0.0, -self.tuning.jump_impulse));
        if self.actor.body.is_some() {
            self.actor.grounded = false;
        }
        self.state = PlayerState::Jumping;
        true
    }

    /// Push horizontally. `direction` is -1..=1.
    ///
    /// With a body this is a force; the caller follows up with
    /// `clamp_horizontal_speed`. Without one it moves the display position
    /// directly and the caller clamps it to the level bounds.
    pub fn move_with_physics(&mut self, physics: &mut PhysicsWorld, direction: f32, dt: f32) {
        if !self.accepts_commands() || direction == 0.0 {
            return;
        }
        let direction = direction.clamp(-1.0, 1.0);
        self.actor.facing = Facing::from_direction(direction, self.actor.facing);

        if self.actor.body.is_some() {
            physics.apply_force(self.actor.id, Vec2::new(direction * self.tuning.move_force, 0.0));
        } else {
            self.fallback_velocity.x = direction * self.actor.speed;
            self.actor.pos.x += self.fallback_velocity.x * dt;
        }
    }

    /// Symmetric clamp of the body's horizontal speed to `max_run_speed`.
    pub fn clamp_horizontal_speed(&self, physics: &mut PhysicsWorld) {
        if self.actor.body.is_none() {
            return;
        }
        let vel = physics.body_velocity(self.actor.id);
        let max = self.tuning.max_run_speed;
        if vel.x.abs() > max {
            physics.set_body_velocity(self.actor.id, Vec2::new(vel.x.clamp(-max, max), vel.y));
        }
    }

    /// Start a swing. No cooldown; ignored while hurt or dead.
    pub fn attack(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        self.state = PlayerState::Attacking;
        self.attack.start(self.tuning.attack_duration);
        self.animator.play(PlayerState::Attacking);
        true
    }

    /// Take a hit. Non-positive amounts are ignored; a dead player ignores everything.
    /// Returns the health removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = self.actor.apply_damage(amount);
        if dealt == 0 {
            return 0;
        }
        self.attack.clear();
        if self.is_alive() {
            self.state = PlayerState::Hurt;
            self.hurt.start(self.tuning.hurt_duration);
        } else {
            self.state = PlayerState::Dead;
            self.hurt.clear();
        }
        dealt
    }

    /// Clamped to `[0, max_health]`. Reaching zero kills the player.
    pub fn set_health(&mut self, health: i32) {
        self.actor.set_health(health);
        if !self.is_alive() {
            self.state = PlayerState::Dead;
            self.hurt.clear();
            self.attack.clear();
        } else if self.state == PlayerState::Dead {
            self.state = PlayerState::Idle;
        }
    }

    // -- Per-frame --

    /// Refresh grounded state, run timers and derive the physical state.
    pub fn update(&mut self, dt: f32, physics: &PhysicsWorld) {
        if !self.is_alive() {
            self.state = PlayerState::Dead;
            self.fallback_velocity = Vec2::ZERO;
            return;
        }
        self.actor.grounded = if self.actor.body.is_some() {
            physics.is_body_on_ground(self.actor.id)
        } else {
            true
        };

        if self.hurt.is_running() {
            if self.hurt.tick(dt) {
                self.state = self.derive_state(physics);
            } else {
                self.state = PlayerState::Hurt;
            }
        } else if self.attack.is_running() {
            if self.attack.tick(dt) {
                self.state = self.derive_state(physics);
            }
        } else {
            self.state = self.derive_state(physics);
        }
        self.fallback_velocity = Vec2::ZERO;
    }

    fn derive_state(&self, physics: &PhysicsWorld) -> PlayerState {
        let vel = if self.actor.body.is_some() {
            self.actor.velocity(physics)
        } else {
            self.fallback_velocity
        };
        if self.actor.grounded {
            if vel.x.abs() > RUN_THRESHOLD {
                PlayerState::Running
            } else {
                PlayerState::Idle
            }
        } else if vel.y < 0.0 {
            PlayerState::Jumping
        } else {
            PlayerState::Falling
        }
    }

    pub fn tick_animation(&mut self, dt: f32) {
        self.animator.play_if_different(self.state);
        self.animator.tick(dt);
    }

    /// Full health, cleared timers, standing at `pos`.
    pub fn respawn(&mut self, physics: &mut PhysicsWorld, pos: Vec2) {
        self.actor.set_health(self.actor.max_health());
        self.hurt.clear();
        self.attack.clear();
        self.state = PlayerState::Idle;
        self.actor.teleport(physics, pos);
        if self.actor.body.is_some() {
            physics.set_body_velocity(self.actor.id, Vec2::ZERO);
        }
    }
}

fn player_clips() -> HashMap<PlayerState, AnimationDef> {
    let mut clips = HashMap::new();
    clips.insert(PlayerState::Idle, AnimationDef::horizontal_strip(0.0, 0.0, 4, 6.0));
    clips.insert(PlayerState::Running, AnimationDef::horizontal_strip(1.0, 0.0, 6, 12.0));
    clips.insert(PlayerState::Jumping, AnimationDef::horizontal_strip(2.0, 0.0, 2, 8.0).once());
    clips.insert(PlayerState::Falling, AnimationDef::horizontal_strip(2.0, 2.0, 2, 8.0));
    clips.insert(PlayerState::Attacking, AnimationDef::horizontal_strip(3.0, 0.0, 4, 14.0).once());
    clips.insert(PlayerState::Hurt, AnimationDef::horizontal_strip(4.0, 0.0, 2, 10.0));
    clips.insert(PlayerState::Dead, AnimationDef::horizontal_strip(5.0, 0.0, 4, 8.0).once());
    clips
}
