//! Sprite animation keyed by an actor's behavior state.
//!
//! Each state owns one clip: a run of atlas cells on a single row. The shown
//! cell is derived from how long the current clip has been playing, so a
//! long frame hitch skips ahead instead of replaying every cell.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Loop,
    /// Play once and hold the last cell.
    Once,
}

/// One clip: `frames` consecutive cells starting at (`first_col`, `row`).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    pub row: f32,
    pub first_col: f32,
    pub frames: u32,
    pub fps: f32,
    pub playback: Playback,
}

impl AnimationDef {
    /// Looping clip along one atlas row.
    pub fn horizontal_strip(row: f32, first_col: f32, frames: u32, fps: f32) -> Self {
        Self {
            row,
            first_col,
            frames,
            fps,
            playback: Playback::Loop,
        }
    }

    pub fn once(mut self) -> Self {
        self.playback = Playback::Once;
        self
    }

    fn step_at(&self, t: f32) -> u32 {
        if self.fps > 0.0 && t > 0.0 {
            (t * self.fps) as u32
        } else {
            0
        }
    }

    fn index_at(&self, t: f32) -> Option<u32> {
        if self.frames == 0 {
            return None;
        }
        let step = self.step_at(t);
        Some(match self.playback {
            Playback::Loop => step % self.frames,
            Playback::Once => step.min(self.frames - 1),
        })
    }

    /// Atlas cell shown `t` seconds into the clip.
    pub fn cell_at(&self, t: f32) -> Option<(f32, f32)> {
        self.index_at(t).map(|i| (self.first_col + i as f32, self.row))
    }
}

/// Clip playback for one actor, driven by its state enum.
#[derive(Debug, Clone)]
pub struct Animator<S> {
    clips: HashMap<S, AnimationDef>,
    current: Option<S>,
    clip_time: f32,
}

impl<S: Copy + Eq + Hash> Animator<S> {
    pub fn new(clips: HashMap<S, AnimationDef>) -> Self {
        Self {
            clips,
            current: None,
            clip_time: 0.0,
        }
    }

    /// Restart the clip for `state`.
    /// States without a clip still become current so `current()` tracks the actor.
    pub fn play(&mut self, state: S) {
        self.current = Some(state);
        self.clip_time = 0.0;
    }

    pub fn play_if_different(&mut self, state: S) {
        if self.current != Some(state) {
            self.play(state);
        }
    }

    pub fn current(&self) -> Option<S> {
        self.current
    }

    fn clip(&self) -> Option<&AnimationDef> {
        self.current.and_then(|s| self.clips.get(&s))
    }

    /// Atlas cell to draw, if the current state has a clip.
    pub fn current_frame(&self) -> Option<(f32, f32)> {
        self.clip().and_then(|clip| clip.cell_at(self.clip_time))
    }

    /// Advance by `dt`. Returns true when the shown cell changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if dt <= 0.0 || self.clip().is_none() {
            return false;
        }
        let before = self.current_frame();
        self.clip_time += dt;
        self.current_frame() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Pose {
        Walk,
        Swing,
        Rest,
    }

    fn animator() -> Animator<Pose> {
        let mut clips = HashMap::new();
        clips.insert(Pose::Walk, AnimationDef::horizontal_strip(0.0, 0.0, 4, 10.0));
        clips.insert(Pose::Swing, AnimationDef::horizontal_strip(1.0, 2.0, 3, 10.0).once());
        Animator::new(clips)
    }

    #[test]
    fn looping_clip_wraps() {
        let mut anim = animator();
        anim.play(Pose::Walk);
        assert_eq!(anim.current_frame(), Some((0.0, 0.0)));
        assert!(anim.tick(0.15));
        assert_eq!(anim.current_frame(), Some((1.0, 0.0)));
        anim.tick(0.3);
        assert_eq!(anim.current_frame(), Some((0.0, 0.0)));
    }

    #[test]
    fn one_shot_holds_last_cell() {
        let mut anim = animator();
        anim.play(Pose::Swing);
        anim.tick(0.25);
        assert_eq!(anim.current_frame(), Some((4.0, 1.0)));
        assert!(!anim.tick(5.0));
        assert_eq!(anim.current_frame(), Some((4.0, 1.0)));
    }

    #[test]
    fn hitch_skips_ahead() {
        let mut anim = animator();
        anim.play(Pose::Walk);
        anim.tick(0.25);
        assert_eq!(anim.current_frame(), Some((2.0, 0.0)));
    }

    #[test]
    fn play_if_different_keeps_progress() {
        let mut anim = animator();
        anim.play(Pose::Walk);
        anim.tick(0.15);
        anim.play_if_different(Pose::Walk);
        assert_eq!(anim.current_frame(), Some((1.0, 0.0)));
        anim.play_if_different(Pose::Swing);
        assert_eq!(anim.current_frame(), Some((2.0, 1.0)));
    }

    #[test]
    fn state_without_clip_has_no_frame() {
        let mut anim = animator();
        anim.play(Pose::Rest);
        assert_eq!(anim.current(), Some(Pose::Rest));
        assert_eq!(anim.current_frame(), None);
        assert!(!anim.tick(1.0));
    }

    #[test]
    fn zero_fps_clip_stays_on_first_cell() {
        let clip = AnimationDef::horizontal_strip(0.0, 5.0, 3, 0.0);
        assert_eq!(clip.cell_at(10.0), Some((5.0, 0.0)));
        assert_eq!(clip.cell_at(0.0), clip.cell_at(10.0));
    }
}
