use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::traits::{DrawSurface, Fill, HudSnapshot, Overlay, Quad};

/// Per-quad render data read by the TypeScript renderer.
/// Must match the host protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center X in world pixels.
    pub x: f32,
    /// Center Y in world pixels (Y-down).
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Atlas column; ignored for solid fills.
    pub sprite_col: f32,
    /// Atlas row; ignored for solid fills.
    pub atlas_row: f32,
    /// UV cell span (1.0 = single cell).
    pub cell_span: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Solid fill color; all zero for sprites.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Bit 0: solid fill. Bit 1: mirrored.
    pub flags: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_SOLID: u32 = 1;
    pub const FLAG_FLIP_X: u32 = 2;

    pub fn from_quad(quad: &Quad) -> Self {
        let center = quad.rect.center();
        let mut flags = 0;
        if quad.flip_x {
            flags |= Self::FLAG_FLIP_X;
        }
        let mut inst = Self {
            x: center.x,
            y: center.y,
            width: quad.rect.size.x,
            height: quad.rect.size.y,
            alpha: quad.alpha,
            ..Self::default()
        };
        match quad.fill {
            Fill::Sprite { col, row, span } => {
                inst.sprite_col = col;
                inst.atlas_row = row;
                inst.cell_span = span;
            }
            Fill::Solid(color) => {
                flags |= Self::FLAG_SOLID;
                inst.r = color.r;
                inst.g = color.g;
                inst.b = color.b;
                inst.alpha *= color.a;
            }
        }
        inst.flags = flags as f32;
        inst
    }
}

/// HUD and overlay floats exposed next to the instance buffer.
/// Layout: [health, max_health, score, level, enemies_left, enemies_total,
/// level_time, play_time, overlay_code, overlay_dim, origin_x, origin_y].
pub const FRAME_INFO_FLOATS: usize = 12;

/// Flat, bytemuck-friendly `DrawSurface` handed to the web host.
pub struct RenderBuffer {
    /// Quads sorted by layer once the frame is finished.
    pub instances: Vec<RenderInstance>,
    layers: Vec<u8>,
    frame_info: [f32; FRAME_INFO_FLOATS],
    capacity: usize,
    dropped: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            layers: Vec::with_capacity(capacity),
            frame_info: [0.0; FRAME_INFO_FLOATS],
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.layers.clear();
        self.frame_info = [0.0; FRAME_INFO_FLOATS];
        self.dropped = 0;
    }

    /// Stable sort by layer so later draws stay on top within a layer.
    pub fn finish(&mut self) {
        if self.layers.windows(2).all(|w| w[0] <= w[1]) {
            return;
        }
        let mut paired: Vec<(u8, RenderInstance)> =
            self.layers.drain(..).zip(self.instances.drain(..)).collect();
        paired.sort_by_key(|(layer, _)| *layer);
        for (layer, inst) in paired {
            self.layers.push(layer);
            self.instances.push(inst);
        }
    }

    /// Quads rejected this frame because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn frame_info(&self) -> &[f32; FRAME_INFO_FLOATS] {
        &self.frame_info
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for RenderBuffer {
    fn begin(&mut self, origin: Vec2) {
        self.clear();
        self.frame_info[10] = origin.x;
        self.frame_info[11] = origin.y;
    }

    fn draw_quad(&mut self, quad: Quad) {
        if self.instances.len() >= self.capacity {
            if self.dropped == 0 {
                log::warn!("render buffer full ({} instances); dropping quads", self.capacity);
            }
            self.dropped += 1;
            return;
        }
        self.instances.push(RenderInstance::from_quad(&quad));
        self.layers.push(quad.layer as u8);
    }

    fn draw_overlay(&mut self, overlay: Overlay) {
        self.frame_info[8] = overlay.kind.code() as f32;
        self.frame_info[9] = overlay.dim;
    }

    fn draw_hud(&mut self, hud: &HudSnapshot) {
        self.frame_info[0] = hud.health as f32;
        self.frame_info[1] = hud.max_health as f32;
        self.frame_info[2] = hud.score as f32;
        self.frame_info[3] = hud.level as f32;
        self.frame_info[4] = hud.enemies_left as f32;
        self.frame_info[5] = hud.enemies_total as f32;
        self.frame_info[6] = hud.level_time;
        self.frame_info[7] = hud.play_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::renderer::traits::{Color, DrawLayer, OverlayKind};

    fn solid(layer: DrawLayer) -> Quad {
        Quad::new(Rect::new(0.0, 0.0, 10.0, 20.0), Fill::Solid(Color::MAGENTA), layer)
    }

    #[test]
    fn render_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
    }

    #[test]
    fn quad_converts_to_centered_instance() {
        let quad = Quad::new(
            Rect::new(100.0, 50.0, 40.0, 60.0),
            Fill::Sprite { col: 3.0, row: 1.0, span: 1.0 },
            DrawLayer::Actors,
        )
        .flipped(true);
        let inst = RenderInstance::from_quad(&quad);
        assert_eq!((inst.x, inst.y), (120.0, 80.0));
        assert_eq!((inst.sprite_col, inst.atlas_row), (3.0, 1.0));
        assert_eq!(inst.flags as u32, RenderInstance::FLAG_FLIP_X);

        let inst = RenderInstance::from_quad(&solid(DrawLayer::Terrain));
        assert_eq!(inst.flags as u32 & RenderInstance::FLAG_SOLID, RenderInstance::FLAG_SOLID);
        assert_eq!((inst.r, inst.g, inst.b), (1.0, 0.0, 1.0));
    }

    #[test]
    fn finish_sorts_by_layer() {
        let mut buf = RenderBuffer::new();
        buf.begin(Vec2::ZERO);
        buf.draw_quad(solid(DrawLayer::Player).with_alpha(0.3));
        buf.draw_quad(solid(DrawLayer::Terrain).with_alpha(0.1));
        buf.draw_quad(solid(DrawLayer::Actors).with_alpha(0.2));
        buf.finish();
        let alphas: Vec<f32> = buf.instances.iter().map(|i| i.alpha).collect();
        assert_eq!(alphas, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut buf = RenderBuffer::with_capacity(2);
        buf.begin(Vec2::ZERO);
        for _ in 0..5 {
            buf.draw_quad(solid(DrawLayer::Actors));
        }
        assert_eq!(buf.instances.len(), 2);
        assert_eq!(buf.dropped(), 3);
    }

    #[test]
    fn hud_and_overlay_land_in_frame_info() {
        let mut buf = RenderBuffer::new();
        buf.begin(Vec2::new(320.0, 0.0));
        buf.draw_hud(&HudSnapshot {
            health: 75,
            max_health: 100,
            score: 1200,
            level: 2,
            ..HudSnapshot::default()
        });
        buf.draw_overlay(Overlay { kind: OverlayKind::Paused, dim: 0.5 });
        let info = buf.frame_info();
        assert_eq!(info[0], 75.0);
        assert_eq!(info[2], 1200.0);
        assert_eq!(info[8], OverlayKind::Paused.code() as f32);
        assert_eq!(info[10], 320.0);
    }
}
