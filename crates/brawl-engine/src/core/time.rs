/// Frame clock for the variable-rate game loop.
/// Clamps each frame delta so a hitch never hands the solver a huge step,
/// and accumulates total session time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Largest delta a single frame may advance by.
    max_dt: f32,
    /// Sum of all clamped deltas seen so far.
    elapsed: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Clamp a raw frame delta into `[0, max_dt]` and record it.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = self.clamp(frame_dt);
        self.elapsed += dt;
        dt
    }

    /// Clamp without recording.
    pub fn clamp(&self, frame_dt: f32) -> f32 {
        if frame_dt.is_nan() {
            return 0.0;
        }
        frame_dt.clamp(0.0, self.max_dt)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Remaining-time countdown decremented by frame delta.
/// Used for cooldowns, hurt windows, animation holds and fades.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub const fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Decrement by `dt`. Returns true on the tick the countdown reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_hitches() {
        let mut clock = FrameClock::new(0.05);
        assert_eq!(clock.advance(0.5), 0.05);
        assert_eq!(clock.advance(0.01), 0.01);
        assert!((clock.elapsed() - 0.06).abs() < 1e-6);
    }

    #[test]
    fn negative_and_nan_deltas_become_zero() {
        let mut clock = FrameClock::new(0.05);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn countdown_fires_once() {
        let mut cd = Countdown::idle();
        cd.start(0.3);
        assert!(cd.is_running());
        assert!(!cd.tick(0.2));
        assert!(cd.tick(0.2));
        assert!(!cd.is_running());
        assert!(!cd.tick(0.2));
    }

    #[test]
    fn countdown_rejects_negative_duration() {
        let mut cd = Countdown::idle();
        cd.start(-2.0);
        assert!(!cd.is_running());
    }
}
