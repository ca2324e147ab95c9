pub mod api;
pub mod assets;
pub mod audio;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{GameConfig, PhysicsConfig, PlayerTuning};
pub use api::context::EngineContext;
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use assets::manifest::{SpriteDescriptor, SpriteManifest};
pub use audio::mixer::{MusicMixer, MusicTrack};
pub use bridge::protocol::{FramePacket, ProtocolLayout};
pub use components::actor::{Actor, Facing};
pub use components::animation::{AnimationDef, Animator};
pub use core::geometry::Rect;
pub use core::physics::{BodyRole, ColliderMaterial, PhysicsBody, PhysicsWorld};
pub use core::time::{Countdown, FrameClock};
pub use error::GameError;
pub use game::director::GameDirector;
pub use game::enemy::{Enemy, EnemyIntent, EnemyKind, EnemyProfile, EnemyState};
pub use game::layouts::{LevelLayout, LevelTable, ObstacleKind, ObstacleSpec, SpawnSpec};
pub use game::level::{Level, LevelState, LevelTick, Obstacle, SpawnPoint};
pub use game::player::{Player, PlayerState};
pub use game::roster::Roster;
pub use game::session::{GameSession, GameState};
pub use input::{Action, InputEvent, InputQueue, InputState, KeyBindings};
pub use renderer::{
    Camera2D, Color, DrawLayer, DrawSurface, Fill, HudSnapshot, Overlay, OverlayKind, Quad,
    RenderBuffer, RenderInstance, FRAME_INFO_FLOATS,
};
