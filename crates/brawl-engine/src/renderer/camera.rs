use glam::Vec2;

use crate::core::geometry::Rect;

/// Side-scrolling camera over a level, in world pixels (Y-down).
pub struct Camera2D {
    /// Visible width in pixels.
    pub width: f32,
    /// Visible height in pixels.
    pub height: f32,
    /// Camera center in world space.
    pub center: Vec2,
    /// Level rectangle the view may not leave.
    pub bounds: Option<Rect>,
    /// Smoothing factor for follow (0.0 = instant, 0.99 = very slow).
    pub smoothing: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width * 0.5, height * 0.5),
            bounds: None,
            smoothing: 0.0,
        }
    }

    /// World position of the view's top-left corner.
    pub fn origin(&self) -> Vec2 {
        self.center - Vec2::new(self.width, self.height) * 0.5
    }

    pub fn view_rect(&self) -> Rect {
        Rect::from_center(self.center, Vec2::new(self.width, self.height))
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        self.clamp_to_bounds();
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Snap to `target`, then clamp.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
        self.clamp_to_bounds();
    }

    /// Ease toward `target`. Call once per frame.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        if self.smoothing <= 0.0 {
            self.look_at(target);
            return;
        }
        let t = 1.0 - self.smoothing.powf(dt * 60.0);
        self.center += (target - self.center) * t;
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        if let Some(bounds) = self.bounds {
            self.center = bounds.clamp_center(self.center, Vec2::new(self.width, self.height));
        }
    }

    /// Whether any part of `rect` is on screen.
    pub fn is_rect_visible(&self, rect: &Rect) -> bool {
        let view = self.view_rect();
        let (a_min, a_max) = (view.min(), view.max());
        let (b_min, b_max) = (rect.min(), rect.max());
        b_max.x >= a_min.x && b_min.x <= a_max.x && b_max.y >= a_min.y && b_min.y <= a_max.y
    }
}
