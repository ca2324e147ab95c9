//! Static level data: spawn schedules and obstacle geometry per level ordinal.
//!
//! Ordinals 1..=3 have hand-authored layouts. Anything past that is generated,
//! scaling enemy and obstacle counts with the ordinal. Hosts may replace any
//! layout by passing a JSON table.

use glam::Vec2;
use serde::Deserialize;

use crate::core::geometry::Rect;
use crate::error::GameError;
use crate::game::enemy::EnemyKind;

/// Height of the ground strip every layout stands on.
const FLOOR_HEIGHT: f32 = 64.0;
const WALL_WIDTH: f32 = 32.0;
const LEVEL_HEIGHT: f32 = 720.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Platform,
    Wall,
}

/// One scheduled enemy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpawnSpec {
    pub position: Vec2,
    pub kind: EnemyKind,
    /// Seconds after level start.
    #[serde(default)]
    pub time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ObstacleSpec {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub name: String,
    pub bounds: Rect,
    pub player_spawn: Vec2,
    #[serde(default)]
    pub spawns: Vec<SpawnSpec>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl LevelLayout {
    /// Reject layouts that cannot be played.
    pub fn validate(&self, ordinal: u32) -> Result<(), GameError> {
        if self.bounds.is_empty() {
            return Err(GameError::setup(ordinal, "level bounds have zero area"));
        }
        if !self.bounds.contains(self.player_spawn) {
            return Err(GameError::setup(
                ordinal,
                format!("player spawn {:?} is outside the level", self.player_spawn),
            ));
        }
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if obstacle.rect.is_empty() {
                return Err(GameError::setup(ordinal, format!("obstacle {i} has no area")));
            }
        }
        for (i, spawn) in self.spawns.iter().enumerate() {
            if !self.bounds.contains(spawn.position) {
                return Err(GameError::setup(
                    ordinal,
                    format!("spawn {i} at {:?} is outside the level", spawn.position),
                ));
            }
            if !spawn.time.is_finite() || spawn.time < 0.0 {
                return Err(GameError::setup(ordinal, format!("spawn {i} has time {}", spawn.time)));
            }
        }
        Ok(())
    }

    /// Built-in layout for `ordinal`, generated past the authored ones.
    pub fn builtin(ordinal: u32) -> Self {
        match ordinal {
            1 => back_alley(),
            2 => loading_dock(),
            3 => rooftops(),
            n => Self::generated(n),
        }
    }

    /// Procedural layout: `2 + 2n` enemies and `1 + n` obstacles for ordinal `n`.
    pub fn generated(ordinal: u32) -> Self {
        let n = ordinal.max(1);
        let width = 1920.0 + 320.0 * n as f32;
        let floor_y = LEVEL_HEIGHT - FLOOR_HEIGHT;

        let mut obstacles = vec![platform(0.0, floor_y, width, FLOOR_HEIGHT)];
        let span = (width - 600.0) / n as f32;
        for i in 0..n {
            let x = 400.0 + span * i as f32;
            let y = floor_y - 120.0 - 60.0 * (i % 2) as f32;
            obstacles.push(platform(x, y, 200.0, 24.0));
        }

        let cycle = [EnemyKind::Grunt, EnemyKind::Runner, EnemyKind::Grunt, EnemyKind::Brute];
        let count = 2 + 2 * n;
        let step = (width - 700.0) / count as f32;
        let spawns = (0..count)
            .map(|i| SpawnSpec {
                position: Vec2::new(600.0 + step * i as f32, floor_y - 60.0),
                kind: cycle[i as usize % cycle.len()],
                time: 1.0 + 1.5 * i as f32,
            })
            .collect();

        Self {
            name: format!("Street {n}"),
            bounds: Rect::new(0.0, 0.0, width, LEVEL_HEIGHT),
            player_spawn: Vec2::new(160.0, floor_y - 64.0),
            spawns,
            obstacles,
        }
    }
}

fn platform(x: f32, y: f32, w: f32, h: f32) -> ObstacleSpec {
    ObstacleSpec {
        rect: Rect::new(x, y, w, h),
        kind: ObstacleKind::Platform,
    }
}

fn wall(x: f32, h: f32) -> ObstacleSpec {
    ObstacleSpec {
        rect: Rect::new(x, 0.0, WALL_WIDTH, h),
        kind: ObstacleKind::Wall,
    }
}

fn spawn(x: f32, y: f32, kind: EnemyKind, time: f32) -> SpawnSpec {
    SpawnSpec {
        position: Vec2::new(x, y),
        kind,
        time,
    }
}

fn back_alley() -> LevelLayout {
    let width = 2560.0;
    let floor_y = LEVEL_HEIGHT - FLOOR_HEIGHT;
    LevelLayout {
        name: "Back Alley".into(),
        bounds: Rect::new(0.0, 0.0, width, LEVEL_HEIGHT),
        player_spawn: Vec2::new(160.0, floor_y - 64.0),
        spawns: vec![
            spawn(900.0, floor_y - 60.0, EnemyKind::Grunt, 1.0),
            spawn(1400.0, floor_y - 60.0, EnemyKind::Grunt, 3.0),
            spawn(2000.0, floor_y - 60.0, EnemyKind::Runner, 6.0),
        ],
        obstacles: vec![
            platform(0.0, floor_y, width, FLOOR_HEIGHT),
            wall(0.0, floor_y),
            wall(width - WALL_WIDTH, floor_y),
            platform(640.0, floor_y - 136.0, 240.0, 24.0),
        ],
    }
}

fn loading_dock() -> LevelLayout {
    let width = 3200.0;
    let floor_y = LEVEL_HEIGHT - FLOOR_HEIGHT;
    LevelLayout {
        name: "Loading Dock".into(),
        bounds: Rect::new(0.0, 0.0, width, LEVEL_HEIGHT),
        player_spawn: Vec2::new(160.0, floor_y - 64.0),
        spawns: vec![
            spawn(800.0, floor_y - 60.0, EnemyKind::Runner, 1.0),
            spawn(1200.0, floor_y - 60.0, EnemyKind::Grunt, 2.0),
            spawn(1700.0, floor_y - 200.0, EnemyKind::Runner, 4.0),
            spawn(2300.0, floor_y - 60.0, EnemyKind::Grunt, 6.0),
            spawn(2800.0, floor_y - 60.0, EnemyKind::Brute, 9.0),
        ],
        obstacles: vec![
            platform(0.0, floor_y, width, FLOOR_HEIGHT),
            wall(0.0, floor_y),
            wall(width - WALL_WIDTH, floor_y),
            platform(1500.0, floor_y - 140.0, 400.0, 32.0),
            platform(2100.0, floor_y - 96.0, 160.0, 96.0),
        ],
    }
}

fn rooftops() -> LevelLayout {
    let width = 3840.0;
    let floor_y = LEVEL_HEIGHT - FLOOR_HEIGHT;
    LevelLayout {
        name: "Rooftops".into(),
        bounds: Rect::new(0.0, 0.0, width, LEVEL_HEIGHT),
        player_spawn: Vec2::new(160.0, floor_y - 64.0),
        spawns: vec![
            spawn(700.0, floor_y - 60.0, EnemyKind::Grunt, 0.5),
            spawn(1100.0, floor_y - 60.0, EnemyKind::Runner, 2.0),
            spawn(1600.0, floor_y - 260.0, EnemyKind::Runner, 3.5),
            spawn(2200.0, floor_y - 60.0, EnemyKind::Brute, 5.0),
            spawn(2900.0, floor_y - 60.0, EnemyKind::Grunt, 7.0),
            spawn(3400.0, floor_y - 60.0, EnemyKind::Brute, 10.0),
        ],
        obstacles: vec![
            platform(0.0, floor_y, width, FLOOR_HEIGHT),
            wall(0.0, floor_y),
            wall(width - WALL_WIDTH, floor_y),
            platform(1400.0, floor_y - 180.0, 480.0, 24.0),
            platform(2600.0, floor_y - 120.0, 240.0, 24.0),
            platform(3000.0, floor_y - 240.0, 240.0, 24.0),
        ],
    }
}

/// Layouts by ordinal, with the built-ins filling any gaps.
#[derive(Debug, Clone, Default)]
pub struct LevelTable {
    overrides: Vec<Option<LevelLayout>>,
}

impl LevelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of layouts; entry `i` replaces ordinal `i + 1`.
    /// `null` entries keep the built-in layout.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let overrides: Vec<Option<LevelLayout>> = serde_json::from_str(json)?;
        Ok(Self { overrides })
    }

    pub fn set(&mut self, ordinal: u32, layout: LevelLayout) {
        let Some(idx) = (ordinal as usize).checked_sub(1) else {
            log::warn!("ignoring layout for ordinal 0");
            return;
        };
        if self.overrides.len() <= idx {
            self.overrides.resize(idx + 1, None);
        }
        self.overrides[idx] = Some(layout);
    }

    pub fn layout_for(&self, ordinal: u32) -> LevelLayout {
        (ordinal as usize)
            .checked_sub(1)
            .and_then(|i| self.overrides.get(i))
            .and_then(|l| l.clone())
            .unwrap_or_else(|| LevelLayout::builtin(ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_valid() {
        for ordinal in 1..=8 {
            let layout = LevelLayout::builtin(ordinal);
            assert!(layout.validate(ordinal).is_ok(), "ordinal {ordinal}");
            assert!(!layout.spawns.is_empty());
        }
    }

    #[test]
    fn generated_scales_with_ordinal() {
        for n in 1..=6 {
            let layout = LevelLayout::generated(n);
            assert_eq!(layout.spawns.len(), (2 + 2 * n) as usize);
            assert_eq!(layout.obstacles.len(), (1 + n) as usize);
        }
    }

    #[test]
    fn validation_catches_bad_geometry() {
        let mut layout = LevelLayout::builtin(1);
        layout.obstacles.push(platform(10.0, 10.0, 0.0, 5.0));
        assert!(matches!(layout.validate(1), Err(GameError::LevelSetup { ordinal: 1, .. })));

        let mut layout = LevelLayout::builtin(1);
        layout.spawns.push(spawn(-50.0, 100.0, EnemyKind::Grunt, 1.0));
        assert!(layout.validate(1).is_err());

        let mut layout = LevelLayout::builtin(1);
        layout.bounds = Rect::new(0.0, 0.0, 0.0, 720.0);
        assert!(layout.validate(1).is_err());
    }

    #[test]
    fn json_overrides_selected_ordinals() {
        let json = r#"[
            null,
            {
                "name": "Test Yard",
                "bounds": { "pos": [0, 0], "size": [800, 600] },
                "player_spawn": [100, 500],
                "spawns": [ { "position": [400, 500], "kind": "ninja", "time": 2.0 } ],
                "obstacles": [
                    { "rect": { "pos": [0, 560], "size": [800, 40] }, "kind": "platform" }
                ]
            }
        ]"#;
        let table = LevelTable::from_json(json).unwrap();
        assert_eq!(table.layout_for(1), LevelLayout::builtin(1));
        let custom = table.layout_for(2);
        assert_eq!(custom.name, "Test Yard");
        assert_eq!(custom.spawns[0].kind, EnemyKind::Generic);
        assert_eq!(table.layout_for(7), LevelLayout::generated(7));
    }
}
