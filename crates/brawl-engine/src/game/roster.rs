use glam::Vec2;

use crate::core::physics::PhysicsWorld;
use crate::game::enemy::Enemy;

/// Live enemies of one level, stored in a flat Vec.
/// Levels hold tens of enemies, so linear scans are fine.
pub struct Roster {
    enemies: Vec<Enemy>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            enemies: Vec::with_capacity(32),
        }
    }

    /// Take ownership of an enemy.
    pub fn spawn(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    /// Nearest living enemy to `pos` within `max_range` (inclusive).
    /// A non-positive range means unbounded. On ties the earliest spawned wins.
    pub fn closest_to(&self, pos: Vec2, max_range: f32) -> Option<&Enemy> {
        self.closest_index(pos, max_range).map(|i| &self.enemies[i])
    }

    pub fn closest_to_mut(&mut self, pos: Vec2, max_range: f32) -> Option<&mut Enemy> {
        let idx = self.closest_index(pos, max_range)?;
        self.enemies.get_mut(idx)
    }

    fn closest_index(&self, pos: Vec2, max_range: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !enemy.is_alive() {
                continue;
            }
            let d = enemy.actor.distance_to(pos);
            if max_range > 0.0 && d > max_range {
                continue;
            }
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Remove every dead enemy, destroying bodies before the enemies are dropped.
    /// Returns the removed enemies in spawn order.
    pub fn sweep_dead(&mut self, physics: &mut PhysicsWorld) -> Vec<Enemy> {
        let mut removed = Vec::new();
        let mut i = 0;
        while i < self.enemies.len() {
            if self.enemies[i].is_alive() {
                i += 1;
                continue;
            }
            let mut enemy = self.enemies.remove(i);
            enemy.actor.detach_body(physics);
            removed.push(enemy);
        }
        removed
    }

    /// Destroy every body and forget every enemy.
    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for enemy in &mut self.enemies {
            enemy.actor.detach_body(physics);
        }
        self.enemies.clear();
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
