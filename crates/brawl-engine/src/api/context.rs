use crate::api::config::PhysicsConfig;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::physics::PhysicsWorld;

/// Mutable engine state shared by the level and the director during a frame:
/// the physics world, the id allocator, and the per-frame host outputs.
pub struct EngineContext {
    pub physics: PhysicsWorld,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(physics: &PhysicsConfig) -> Self {
        Self::with_physics(PhysicsWorld::new(physics))
    }

    /// Build around an existing world, e.g. `PhysicsWorld::unavailable()`.
    pub fn with_physics(physics: PhysicsWorld) -> Self {
        Self {
            physics,
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue a sound cue for the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Queue a game event for the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}
