use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel space. `pos` is the top-left corner (Y-down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rect of `size` centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.pos.x && p.x <= max.x && p.y >= self.pos.y && p.y <= max.y
    }

    /// Strict overlap test; rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x < b_max.x
            && a_max.x > other.pos.x
            && self.pos.y < b_max.y
            && a_max.y > other.pos.y
    }

    /// Clamp a center point so a box of `size` stays inside this rect.
    pub fn clamp_center(&self, center: Vec2, size: Vec2) -> Vec2 {
        let half = size * 0.5;
        let lo = self.pos + half;
        let hi = self.max() - half;
        Vec2::new(
            if lo.x <= hi.x { center.x.clamp(lo.x, hi.x) } else { self.center().x },
            if lo.y <= hi.y { center.y.clamp(lo.y, hi.y) } else { self.center().y },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(!r.contains(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.0, 9.0, 5.0, 5.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn clamp_center_keeps_box_inside() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let c = bounds.clamp_center(Vec2::new(-20.0, 70.0), Vec2::new(10.0, 10.0));
        assert_eq!(c, Vec2::new(5.0, 45.0));
    }
}
