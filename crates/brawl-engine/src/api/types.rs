use bytemuck::{Pod, Zeroable};

/// Stable identity of anything the game tracks: player, enemies, level geometry.
/// Allocated from a monotonically increasing counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A one-shot sound cue emitted by the game logic.
/// The numeric value maps to a host-defined sound in the browser SoundManager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const JUMP: SoundEvent = SoundEvent(1);
    pub const SWING: SoundEvent = SoundEvent(2);
    pub const HIT: SoundEvent = SoundEvent(3);
    pub const PLAYER_HURT: SoundEvent = SoundEvent(4);
    pub const ENEMY_DOWN: SoundEvent = SoundEvent(5);
    pub const LEVEL_CLEAR: SoundEvent = SoundEvent(6);
    pub const GAME_OVER: SoundEvent = SoundEvent(7);
}

/// A game event communicated from Rust to the host via a flat float buffer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = new `GameState` code.
    pub const STATE_CHANGED: f32 = 1.0;
    /// `a` = cumulative score.
    pub const SCORE: f32 = 2.0;
    /// `a` = level ordinal, `b` = enemies configured.
    pub const LEVEL_STARTED: f32 = 3.0;
    /// `a` = health, `b` = max health.
    pub const PLAYER_HEALTH: f32 = 4.0;
    /// `a` = killed so far, `b` = total configured.
    pub const ENEMY_KILLED: f32 = 5.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn game_event_casts_to_floats() {
        let events = [GameEvent::new(GameEvent::SCORE, 1500.0, 0.0, 0.0)];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats, &[2.0, 1500.0, 0.0, 0.0]);
    }
}
