use glam::Vec2;
use serde::Deserialize;

use crate::error::GameError;
use crate::input::bindings::KeyBindings;

/// Simulation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// When false the game runs with direct position movement only.
    pub enabled: bool,
    /// Scale between display pixels and simulation meters.
    pub pixels_per_meter: f32,
    /// Gravity in m/s². Y-down, so positive Y pulls toward the floor.
    pub gravity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pixels_per_meter: 32.0,
            gravity: Vec2::new(0.0, 20.0),
        }
    }
}

/// Player stats and control tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: i32,
    /// Direct movement speed (px/s) used when there is no physics body.
    pub speed: f32,
    /// Horizontal force (N) per frame of held movement.
    pub move_force: f32,
    /// Horizontal speed clamp (px/s), applied symmetrically.
    pub max_run_speed: f32,
    /// Upward impulse (N·s) of a jump.
    pub jump_impulse: f32,
    pub hurt_duration: f32,
    pub attack_duration: f32,
    pub attack_damage: i32,
    pub attack_range: f32,
    /// Sprite footprint in pixels; also the collider size.
    pub size: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            speed: 220.0,
            move_force: 60.0,
            max_run_speed: 220.0,
            jump_impulse: 30.0,
            hurt_duration: 0.5,
            attack_duration: 0.3,
            attack_damage: 25,
            attack_range: 70.0,
            size: Vec2::new(48.0, 64.0),
        }
    }
}

/// Configuration for the game, supplied by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ceiling on a single frame's delta, in seconds.
    pub max_frame_dt: f32,
    /// Viewport width in pixels.
    pub world_width: f32,
    /// Viewport height in pixels.
    pub world_height: f32,
    /// Number of levels in a play-through.
    pub level_count: usize,
    /// Score awarded when a level is cleared.
    pub level_complete_bonus: u32,
    /// Radius around the player searched for contact damage.
    pub contact_radius: f32,
    /// Input lockout after the player takes a hit, in seconds.
    pub input_cooldown: f32,
    /// Music crossfade duration, in seconds.
    pub music_fade: f32,
    /// Camera follow smoothing, 0.0 snaps to the player.
    pub camera_smoothing: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    pub physics: PhysicsConfig,
    pub player: PlayerTuning,
    pub bindings: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.05,
            world_width: 1280.0,
            world_height: 720.0,
            level_count: 5,
            level_complete_bonus: 1000,
            contact_radius: 80.0,
            input_cooldown: 0.5,
            music_fade: 1.0,
            camera_smoothing: 0.0,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
            physics: PhysicsConfig::default(),
            player: PlayerTuning::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}
