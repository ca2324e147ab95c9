/// Flat frame buffer shared with the JS host.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Frame info: 12 floats]  (HUD, overlay, camera origin)
/// [Instances: max_instances × 12 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame so the reader can
/// compute offsets without a separate handshake.

use crate::api::config::GameConfig;
use crate::api::types::{GameEvent, SoundEvent};
use crate::game::session::GameState;
use crate::renderer::instance::{RenderBuffer, RenderInstance, FRAME_INFO_FLOATS};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_SOUNDS: usize = 4;
pub const HEADER_SOUND_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_WORLD_WIDTH: usize = 8;
pub const HEADER_WORLD_HEIGHT: usize = 9;
pub const HEADER_GAME_STATE: usize = 10;
pub const HEADER_MUSIC_MENU: usize = 11;
pub const HEADER_MUSIC_GAMEPLAY: usize = 12;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Section sizes and offsets for a set of capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub frame_info_offset: usize,
    pub instance_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

/// One frame's worth of data to pack.
pub struct FramePacket<'a> {
    pub frame_counter: u32,
    pub state: GameState,
    pub world_size: (f32, f32),
    /// (menu, gameplay) music volumes.
    pub music: (f32, f32),
    pub render: &'a RenderBuffer,
    pub sounds: &'a [SoundEvent],
    pub events: &'a [GameEvent],
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize) -> Self {
        let frame_info_offset = HEADER_FLOATS;
        let instance_data_offset = frame_info_offset + FRAME_INFO_FLOATS;
        let sound_data_offset = instance_data_offset + max_instances * RenderInstance::FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_sounds,
            max_events,
            frame_info_offset,
            instance_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_sounds, config.max_events)
    }

    /// Allocate a zeroed buffer of the right size.
    pub fn alloc(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Write `packet` into `out`, truncating each section to its capacity.
    /// `out` shorter than the layout is left untouched.
    pub fn write(&self, packet: &FramePacket, out: &mut [f32]) {
        if out.len() < self.buffer_total_floats {
            log::warn!(
                "frame buffer has {} floats, layout needs {}",
                out.len(),
                self.buffer_total_floats
            );
            return;
        }

        let drawn = packet.render.instances.len().min(self.max_instances);
        let instances = &packet.render.instances[..drawn];
        let sounds = &packet.sounds[..packet.sounds.len().min(self.max_sounds)];
        let events = &packet.events[..packet.events.len().min(self.max_events)];
        if sounds.len() < packet.sounds.len() || events.len() < packet.events.len() {
            log::debug!(
                "frame {}: dropped {} sounds, {} events",
                packet.frame_counter,
                packet.sounds.len() - sounds.len(),
                packet.events.len() - events.len()
            );
        }

        let header = &mut out[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = packet.frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_SOUND_COUNT] = sounds.len() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_WORLD_WIDTH] = packet.world_size.0;
        header[HEADER_WORLD_HEIGHT] = packet.world_size.1;
        header[HEADER_GAME_STATE] = packet.state.code() as f32;
        header[HEADER_MUSIC_MENU] = packet.music.0;
        header[HEADER_MUSIC_GAMEPLAY] = packet.music.1;

        out[self.frame_info_offset..self.instance_data_offset]
            .copy_from_slice(packet.render.frame_info());

        let floats: &[f32] = bytemuck::cast_slice(instances);
        let start = self.instance_data_offset;
        out[start..start + floats.len()].copy_from_slice(floats);

        for (slot, sound) in out[self.sound_data_offset..].iter_mut().zip(sounds) {
            *slot = sound.0 as f32;
        }

        let floats: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + floats.len()].copy_from_slice(floats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::renderer::traits::{Color, DrawLayer, DrawSurface, Fill, Quad};
    use glam::Vec2;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 20);
        assert_eq!(layout.frame_info_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS + FRAME_INFO_FLOATS);
        assert_eq!(
            layout.sound_data_offset,
            layout.instance_data_offset + 100 * RenderInstance::FLOATS
        );
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + 10);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 20 * EVENT_FLOATS);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn default_config_capacities() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_instances, 512);
        assert_eq!(layout.max_sounds, 32);
        assert_eq!(layout.max_events, 32);
    }

    #[test]
    fn write_packs_every_section() {
        let layout = ProtocolLayout::new(4, 2, 2);
        let mut render = RenderBuffer::with_capacity(4);
        render.begin(Vec2::new(64.0, 0.0));
        render.draw_quad(Quad::new(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Fill::Solid(Color::WHITE),
            DrawLayer::Actors,
        ));
        let sounds = [SoundEvent::JUMP, SoundEvent::HIT, SoundEvent::SWING];
        let events = [GameEvent::new(GameEvent::SCORE, 300.0, 0.0, 0.0)];
        let packet = FramePacket {
            frame_counter: 7,
            state: GameState::Playing,
            world_size: (1280.0, 720.0),
            music: (0.0, 1.0),
            render: &render,
            sounds: &sounds,
            events: &events,
        };

        let mut out = layout.alloc();
        layout.write(&packet, &mut out);
        assert_eq!(out[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(out[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(out[HEADER_SOUND_COUNT], 2.0, "sounds are truncated to capacity");
        assert_eq!(out[HEADER_GAME_STATE], GameState::Playing.code() as f32);
        assert_eq!(out[layout.frame_info_offset + 10], 64.0);
        assert_eq!(out[layout.instance_data_offset], 5.0);
        assert_eq!(&out[layout.sound_data_offset..layout.sound_data_offset + 2], &[1.0, 3.0]);
        let event = &out[layout.event_data_offset..layout.event_data_offset + 2];
        assert_eq!(event, &[GameEvent::SCORE, 300.0]);
    }

    #[test]
    fn short_buffer_is_left_alone() {
        let layout = ProtocolLayout::new(4, 2, 2);
        let render = RenderBuffer::new();
        let packet = FramePacket {
            frame_counter: 1,
            state: GameState::Menu,
            world_size: (0.0, 0.0),
            music: (1.0, 0.0),
            render: &render,
            sounds: &[],
            events: &[],
        };
        let mut out = vec![-1.0; 3];
        layout.write(&packet, &mut out);
        assert_eq!(out, vec![-1.0; 3]);
    }
}
