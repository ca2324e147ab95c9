use std::collections::HashMap;

use glam::Vec2;
use serde::Deserialize;

use crate::api::types::EntityId;
use crate::components::actor::{Actor, Facing};
use crate::components::animation::{AnimationDef, Animator};
use crate::core::physics::{BodyRole, PhysicsWorld};
use crate::core::time::Countdown;

/// How long an enemy flashes after taking a non-lethal hit.
const HURT_FLASH: f32 = 0.2;
/// How long the attack pose is held after a swing.
const ATTACK_POSE: f32 = 0.25;

/// Closed set of enemy types. Unknown names fall back to `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Grunt,
    Runner,
    Brute,
    #[serde(other)]
    Generic,
}

/// Static stats for one enemy type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub health: i32,
    pub damage: i32,
    /// px/s
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Seconds between attacks.
    pub attack_cooldown: f32,
    /// Score awarded on kill.
    pub score: u32,
    /// Sprite footprint in pixels.
    pub size: Vec2,
}

impl EnemyKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grunt" => EnemyKind::Grunt,
            "runner" => EnemyKind::Runner,
            "brute" => EnemyKind::Brute,
            _ => EnemyKind::Generic,
        }
    }

    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Grunt => EnemyProfile {
                health: 50,
                damage: 10,
                speed: 90.0,
                detection_range: 400.0,
                attack_range: 50.0,
                attack_cooldown: 1.0,
                score: 100,
                size: Vec2::new(40.0, 56.0),
            },
            EnemyKind::Runner => EnemyProfile {
                health: 30,
                damage: 6,
                speed: 160.0,
                detection_range: 500.0,
                attack_range: 45.0,
                attack_cooldown: 0.6,
                score: 150,
                size: Vec2::new(36.0, 48.0),
            },
            EnemyKind::Brute => EnemyProfile {
                health: 120,
                damage: 25,
                speed: 60.0,
                detection_range: 350.0,
                attack_range: 60.0,
                attack_cooldown: 1.8,
                score: 300,
                size: Vec2::new(64.0, 80.0),
            },
            EnemyKind::Generic => EnemyProfile {
                health: 40,
                damage: 8,
                speed: 80.0,
                detection_range: 300.0,
                attack_range: 50.0,
                attack_cooldown: 1.2,
                score: 50,
                size: Vec2::new(40.0, 56.0),
            },
        }
    }

    /// Sprite manifest key.
    pub fn visual_key(self) -> &'static str {
        match self {
            EnemyKind::Grunt => "enemy.grunt",
            EnemyKind::Runner => "enemy.runner",
            EnemyKind::Brute => "enemy.brute",
            EnemyKind::Generic => "enemy.generic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    Idle,
    Chasing,
    Attacking,
    Dead,
}

/// One frame's AI decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyIntent {
    /// Player out of detection range.
    Idle,
    /// In attack range but the cooldown is still running.
    Hold,
    /// Landed an attack for this much damage.
    Attack(i32),
    /// Walk to `target` this frame.
    Move { target: Vec2 },
}

pub struct Enemy {
    pub actor: Actor,
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    pub state: EnemyState,
    cooldown: Countdown,
    hurt_flash: Countdown,
    attack_pose: Countdown,
    animator: Animator<EnemyState>,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2) -> Self {
        let profile = kind.profile();
        let actor = Actor::new(id, profile.health)
            .with_pos(pos)
            .with_size(profile.size)
            .with_speed(profile.speed);
        let mut animator = Animator::new(enemy_clips());
        animator.play(EnemyState::Idle);

        Self {
            actor,
            kind,
            profile,
            state: EnemyState::Idle,
            cooldown: Countdown::idle(),
            hurt_flash: Countdown::idle(),
            attack_pose: Countdown::idle(),
            animator,
        }
    }

    /// Create the enemy and its physics body together.
    pub fn spawn(id: EntityId, kind: EnemyKind, pos: Vec2, physics: &mut PhysicsWorld) -> Self {
        let mut enemy = Self::new(id, kind, pos);
        enemy.actor.attach_body(physics, BodyRole::Enemy);
        enemy
    }

    pub fn id(&self) -> EntityId {
        self.actor.id
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    /// True while the post-hit flash is showing.
    pub fn is_flashing(&self) -> bool {
        self.hurt_flash.is_running()
    }

    pub fn frame(&self) -> Option<(f32, f32)> {
        self.animator.current_frame()
    }

    /// Advance timers and decide what to do about a player at `player_pos`.
    ///
    /// Idle beyond detection range; attack inside attack range when the
    /// cooldown allows; otherwise step toward the player, never closer than
    /// attack range.
    pub fn think(&mut self, dt: f32, player_pos: Vec2) -> EnemyIntent {
        if !self.is_alive() {
            return EnemyIntent::Idle;
        }
        self.cooldown.tick(dt);
        self.hurt_flash.tick(dt);
        self.attack_pose.tick(dt);

        let to_player = player_pos - self.actor.pos;
        let distance = to_player.length();

        let intent = if distance > self.profile.detection_range {
            EnemyIntent::Idle
        } else if distance <= self.profile.attack_range {
            match self.try_attack() {
                0 => EnemyIntent::Hold,
                damage => EnemyIntent::Attack(damage),
            }
        } else {
            let travel = (self.profile.speed * dt).min(distance - self.profile.attack_range);
            let target = self.actor.pos + to_player / distance * travel;
            EnemyIntent::Move { target }
        };

        self.state = match intent {
            EnemyIntent::Idle => EnemyState::Idle,
            EnemyIntent::Attack(_) => EnemyState::Attacking,
            EnemyIntent::Hold if self.attack_pose.is_running() => EnemyState::Attacking,
            EnemyIntent::Hold => EnemyState::Idle,
            EnemyIntent::Move { .. } => EnemyState::Chasing,
        };
        intent
    }

    /// Carry out an intent on the display position or the physics body.
    pub fn apply(&mut self, intent: EnemyIntent, dt: f32, physics: &mut PhysicsWorld) {
        if !self.is_alive() {
            return;
        }
        let has_body = self.actor.body.is_some();
        match intent {
            EnemyIntent::Move { target } => {
                let delta = target - self.actor.pos;
                self.actor.facing = Facing::from_direction(delta.x, self.actor.facing);
                if has_body && dt > 0.0 {
                    // Horizontal only: gravity owns the vertical axis.
                    let vy = physics.body_velocity(self.actor.id).y;
                    physics.set_body_velocity(self.actor.id, Vec2::new(delta.x / dt, vy));
                } else {
                    self.actor.pos = target;
                }
            }
            EnemyIntent::Idle | EnemyIntent::Hold | EnemyIntent::Attack(_) => {
                if has_body {
                    let vy = physics.body_velocity(self.actor.id).y;
                    physics.set_body_velocity(self.actor.id, Vec2::new(0.0, vy));
                }
            }
        }
    }

    /// Attack if the cooldown allows. Returns the damage dealt, 0 otherwise.
    pub fn try_attack(&mut self) -> i32 {
        if !self.is_alive() || self.cooldown.is_running() {
            return 0;
        }
        self.cooldown.start(self.profile.attack_cooldown);
        self.attack_pose.start(ATTACK_POSE);
        self.state = EnemyState::Attacking;
        self.profile.damage
    }

    /// Take a hit. Dead enemies ignore further damage.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = self.actor.apply_damage(amount);
        if dealt == 0 {
            return 0;
        }
        if self.is_alive() {
            self.hurt_flash.start(HURT_FLASH);
        } else {
            self.state = EnemyState::Dead;
            self.hurt_flash.clear();
            self.animator.play(EnemyState::Dead);
        }
        dealt
    }

    pub fn tick_animation(&mut self, dt: f32) {
        self.animator.play_if_different(self.state);
        self.animator.tick(dt);
    }
}

fn enemy_clips() -> HashMap<EnemyState, AnimationDef> {
    let mut clips = HashMap::new();
    clips.insert(EnemyState::Idle, AnimationDef::horizontal_strip(0.0, 0.0, 2, 3.0));
    clips.insert(EnemyState::Chasing, AnimationDef::horizontal_strip(1.0, 0.0, 4, 8.0));
    clips.insert(EnemyState::Attacking, AnimationDef::horizontal_strip(2.0, 0.0, 3, 12.0).once());
    clips.insert(EnemyState::Dead, AnimationDef::horizontal_strip(3.0, 0.0, 3, 8.0).once());
    clips
}
