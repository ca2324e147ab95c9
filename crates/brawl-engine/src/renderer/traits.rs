//! Drawing contract between the game and whatever puts pixels on screen.
//!
//! The game never rasterizes anything itself. Each frame it describes what is
//! visible as quads, at most one full-screen overlay and a HUD snapshot, and
//! hands them to a `DrawSurface`. The web build uses `RenderBuffer`, which
//! flattens everything into float buffers for the TypeScript renderer.

use serde::Deserialize;

use crate::core::geometry::Rect;

/// Linear RGBA, 0.0..=1.0 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// How a quad is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Atlas cell at (col, row) spanning `span` cells.
    Sprite { col: f32, row: f32, span: f32 },
    /// Flat color, used when a sprite is missing.
    Solid(Color),
}

/// Draw order bucket. Lower layers are drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrawLayer {
    Terrain = 0,
    Actors = 1,
    Player = 2,
}

/// One axis-aligned quad in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub fill: Fill,
    pub layer: DrawLayer,
    /// Mirror horizontally (actor facing left).
    pub flip_x: bool,
    pub alpha: f32,
}

impl Quad {
    pub fn new(rect: Rect, fill: Fill, layer: DrawLayer) -> Self {
        Self {
            rect,
            fill,
            layer,
            flip_x: false,
            alpha: 1.0,
        }
    }

    pub fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Full-screen panels drawn over (or instead of) the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Title,
    Paused,
    LevelComplete,
    GameOver,
    Victory,
}

impl OverlayKind {
    pub fn code(self) -> u32 {
        match self {
            OverlayKind::Title => 1,
            OverlayKind::Paused => 2,
            OverlayKind::LevelComplete => 3,
            OverlayKind::GameOver => 4,
            OverlayKind::Victory => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    /// How much the world underneath is darkened (0 = not at all).
    pub dim: f32,
}

/// Numbers the HUD shows. Text layout is the host's job.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    pub level: u32,
    pub enemies_left: u32,
    pub enemies_total: u32,
    pub level_time: f32,
    pub play_time: f32,
}

/// Anything that can receive a frame's draw calls.
pub trait DrawSurface {
    /// Start a new frame. `origin` is the world position of the viewport's
    /// top-left corner.
    fn begin(&mut self, origin: glam::Vec2);

    fn draw_quad(&mut self, quad: Quad);

    fn draw_overlay(&mut self, overlay: Overlay);

    fn draw_hud(&mut self, hud: &HudSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_order_terrain_first() {
        assert!(DrawLayer::Terrain < DrawLayer::Actors);
        assert!(DrawLayer::Actors < DrawLayer::Player);
    }

    #[test]
    fn color_parses_from_json() {
        let json = r#"{ "r": 0.5, "g": 0.25, "b": 0.0, "a": 1.0 }"#;
        let c: Color = serde_json::from_str(json).unwrap();
        assert_eq!(c, Color::rgb(0.5, 0.25, 0.0));
        assert_eq!(Color::WHITE.with_alpha(0.5).a, 0.5);
    }
}
