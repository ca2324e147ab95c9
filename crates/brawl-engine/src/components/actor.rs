use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::geometry::Rect;
use crate::core::physics::{BodyRole, PhysicsBody, PhysicsWorld};

/// Which way an actor is looking. Drives sprite flipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing for a horizontal direction; zero keeps the current facing.
    pub fn from_direction(dx: f32, current: Facing) -> Facing {
        if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            current
        }
    }
}

/// State shared by the player and enemies: where it is, how healthy it is,
/// and the optional physics body behind it.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Unique identifier; also the key of the physics record.
    pub id: EntityId,
    /// Center position in pixels.
    pub pos: Vec2,
    /// Sprite footprint in pixels.
    pub size: Vec2,
    /// Movement speed in px/s.
    pub speed: f32,
    /// Physics body, absent when the simulation is unavailable.
    pub body: Option<PhysicsBody>,
    pub grounded: bool,
    pub facing: Facing,
    health: i32,
    max_health: i32,
}

impl Actor {
    pub fn new(id: EntityId, max_health: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            id,
            pos: Vec2::ZERO,
            size: Vec2::splat(32.0),
            speed: 0.0,
            body: None,
            grounded: false,
            facing: Facing::Right,
            health: max_health,
            max_health,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    // -- Health --

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Set health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Subtract `amount` from health, floored at zero.
    /// Non-positive amounts and hits on a dead actor are ignored.
    /// Returns the health actually removed.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 || !self.is_alive() {
            return 0;
        }
        let before = self.health;
        self.health = before.saturating_sub(amount).max(0);
        before - self.health
    }

    // -- Geometry --

    /// Visual bounds in pixels.
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }

    // -- Physics link --

    /// Create the body for this actor at its current position.
    /// Leaves `body` empty when physics is unavailable.
    pub fn attach_body(&mut self, physics: &mut PhysicsWorld, role: BodyRole) {
        self.body = match role {
            BodyRole::Player => physics.create_player_body(self.pos, self.size, self.id),
            BodyRole::Enemy => physics.create_enemy_body(self.pos, self.size, self.id),
            BodyRole::Platform | BodyRole::Wall => {
                log::warn!("actor {:?} cannot take a static {:?} body", self.id, role);
                None
            }
        };
    }

    /// Remove the physics record first, then forget the handle.
    pub fn detach_body(&mut self, physics: &mut PhysicsWorld) {
        if self.body.is_some() {
            physics.destroy_body(self.id);
        }
        self.body = None;
    }

    /// Copy the body's position back into the display position.
    pub fn sync_from_physics(&mut self, physics: &PhysicsWorld) {
        if self.body.is_none() {
            return;
        }
        if let Some(pos) = physics.body_position(self.id) {
            self.pos = pos;
        }
    }

    /// Move the actor (and its body, if any) to `pos`.
    pub fn teleport(&mut self, physics: &mut PhysicsWorld, pos: Vec2) {
        self.pos = pos;
        if self.body.is_some() {
            physics.set_body_position(self.id, pos);
        }
    }

    /// Velocity in px/s as seen by the simulation; zero without a body.
    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec2 {
        if self.body.is_some() {
            physics.body_velocity(self.id)
        } else {
            Vec2::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::PhysicsConfig;

    #[test]
    fn health_stays_in_range() {
        let mut a = Actor::new(EntityId(1), 50);
        for amount in [10, -5, 0, 1000, 7] {
            a.apply_damage(amount);
            assert!((0..=a.max_health()).contains(&a.health()));
        }
        a.set_health(i32::MAX);
        assert_eq!(a.health(), 50);
        a.set_health(i32::MIN);
        assert_eq!(a.health(), 0);
    }

    #[test]
    fn damage_reports_what_was_removed() {
        let mut a = Actor::new(EntityId(1), 30);
        assert_eq!(a.apply_damage(-3), 0);
        assert_eq!(a.apply_damage(20), 20);
        assert_eq!(a.apply_damage(20), 10);
        assert!(!a.is_alive());
        assert_eq!(a.apply_damage(5), 0);
    }

    #[test]
    fn body_follows_actor_lifecycle() {
        let mut physics = PhysicsWorld::new(&PhysicsConfig::default());
        let mut a = Actor::new(EntityId(7), 10).with_pos(Vec2::new(64.0, 64.0));
        a.attach_body(&mut physics, BodyRole::Enemy);
        assert!(a.body.is_some());
        assert!(physics.has_body(EntityId(7)));
        a.detach_body(&mut physics);
        assert!(a.body.is_none());
        assert!(!physics.has_body(EntityId(7)));
    }

    #[test]
    fn no_body_without_physics() {
        let mut physics = PhysicsWorld::unavailable();
        let mut a = Actor::new(EntityId(7), 10);
        a.attach_body(&mut physics, BodyRole::Player);
        assert!(a.body.is_none());
        a.teleport(&mut physics, Vec2::new(5.0, 6.0));
        a.sync_from_physics(&physics);
        assert_eq!(a.pos, Vec2::new(5.0, 6.0));
    }
}
