//! Music state. Playback itself belongs to the host; sound cues travel as
//! `SoundEvent`s on the engine context.

pub mod mixer;

pub use mixer::{MusicMixer, MusicTrack};
