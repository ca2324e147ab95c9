use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::GameError;
use crate::renderer::traits::{Color, Fill};

/// Describes a single texture atlas.
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "actors").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file, resolved by the host.
    pub path: String,
}

/// A named sprite: the first cell of its animation strips.
/// Animation frames are offsets from this cell.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpriteDescriptor {
    pub col: u32,
    pub row: u32,
    /// Number of cells this sprite spans (default: 1).
    #[serde(default = "default_span")]
    pub span: u32,
}

fn default_span() -> u32 {
    1
}

/// Maps visual keys ("player", "enemy.grunt", "platform") to atlas cells.
///
/// Keys with no sprite draw as a solid color instead. The first miss of each
/// key is logged; later misses are silent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpriteManifest {
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Optional per-key colors used instead of the built-in fallback palette.
    #[serde(default)]
    pub colors: HashMap<String, Color>,
    #[serde(skip)]
    warned: HashSet<String>,
}

impl SpriteManifest {
    /// Empty manifest: every key falls back to a solid color.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, sprite: SpriteDescriptor) {
        let key = key.into();
        self.warned.remove(&key);
        self.sprites.insert(key, sprite);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sprites.contains_key(key)
    }

    /// Fill for `key` showing animation cell `frame` (col, row offset).
    pub fn resolve(&mut self, key: &str, frame: Option<(f32, f32)>) -> Fill {
        if let Some(sprite) = self.sprites.get(key) {
            let (dc, dr) = frame.unwrap_or((0.0, 0.0));
            return Fill::Sprite {
                col: sprite.col as f32 + dc,
                row: sprite.row as f32 + dr,
                span: sprite.span as f32,
            };
        }
        if !self.warned.contains(key) {
            log::warn!("no sprite for '{}'; drawing a solid color", key);
            self.warned.insert(key.to_string());
        }
        Fill::Solid(self.fallback_color(key))
    }

    fn fallback_color(&self, key: &str) -> Color {
        if let Some(color) = self.colors.get(key) {
            return *color;
        }
        match key {
            "player" => Color::rgb(0.2, 0.5, 0.95),
            "platform" => Color::rgb(0.45, 0.45, 0.5),
            "wall" => Color::rgb(0.3, 0.3, 0.35),
            k if k.starts_with("enemy.") => Color::rgb(0.85, 0.2, 0.2),
            _ => Color::MAGENTA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "actors", "cols": 16, "rows": 8, "path": "actors.png" }
            ],
            "sprites": {
                "player": { "col": 0, "row": 0 },
                "enemy.brute": { "col": 8, "row": 4, "span": 2 }
            },
            "colors": {
                "wall": { "r": 0.1, "g": 0.1, "b": 0.1, "a": 1.0 }
            }
        }"#;
        let mut manifest = SpriteManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases[0].cols, 16);
        assert_eq!(
            manifest.resolve("enemy.brute", Some((1.0, 2.0))),
            Fill::Sprite { col: 9.0, row: 6.0, span: 2.0 }
        );
        assert_eq!(manifest.resolve("wall", None), Fill::Solid(Color::rgb(0.1, 0.1, 0.1)));
    }

    #[test]
    fn missing_sprite_falls_back_once_per_key() {
        let mut manifest = SpriteManifest::new();
        for _ in 0..3 {
            assert!(matches!(manifest.resolve("enemy.grunt", None), Fill::Solid(_)));
        }
        manifest.resolve("player", None);
        assert_eq!(manifest.warned.len(), 2);
    }

    #[test]
    fn inserted_sprite_replaces_fallback() {
        let mut manifest = SpriteManifest::new();
        manifest.resolve("player", None);
        manifest.insert("player", SpriteDescriptor { col: 2, row: 0, span: 1 });
        assert!(manifest.contains("player"));
        assert!(manifest.warned.is_empty());
        assert!(matches!(manifest.resolve("player", None), Fill::Sprite { .. }));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(SpriteManifest::from_json("[1, 2]").is_err());
    }
}
