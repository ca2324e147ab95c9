use crate::game::session::GameState;

/// Background tracks the host can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Gameplay,
}

/// Gameplay volume while paused.
const PAUSED_DUCK: f32 = 0.3;

/// Cross-fades the menu and gameplay tracks as the game state changes.
///
/// Only volumes live here. The host reads them every frame and applies them
/// to whatever it is playing; nothing in the game depends on audio.
#[derive(Debug, Clone)]
pub struct MusicMixer {
    menu: f32,
    gameplay: f32,
    menu_target: f32,
    gameplay_target: f32,
    /// Seconds for a full 0→1 fade.
    fade: f32,
    master: f32,
}

impl MusicMixer {
    pub fn new(fade: f32) -> Self {
        Self {
            menu: 1.0,
            gameplay: 0.0,
            menu_target: 1.0,
            gameplay_target: 0.0,
            fade: fade.max(0.0),
            master: 1.0,
        }
    }

    /// Retarget the fade for a new game state.
    pub fn on_state(&mut self, state: GameState) {
        let (menu, gameplay) = match state {
            GameState::Playing | GameState::LevelCompleted => (0.0, 1.0),
            GameState::Paused => (0.0, PAUSED_DUCK),
            GameState::Menu | GameState::GameOver | GameState::Victory => (1.0, 0.0),
        };
        self.menu_target = menu;
        self.gameplay_target = gameplay;
    }

    /// Move both volumes toward their targets.
    pub fn update(&mut self, dt: f32) {
        let step = if self.fade > 0.0 { dt / self.fade } else { f32::INFINITY };
        self.menu = approach(self.menu, self.menu_target, step);
        self.gameplay = approach(self.gameplay, self.gameplay_target, step);
    }

    pub fn set_master(&mut self, volume: f32) {
        self.master = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self, track: MusicTrack) -> f32 {
        let v = match track {
            MusicTrack::Menu => self.menu,
            MusicTrack::Gameplay => self.gameplay,
        };
        v * self.master
    }
}

impl Default for MusicMixer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn approach(current: f32, target: f32, step: f32) -> f32 {
    if (target - current).abs() <= step {
        target
    } else if target > current {
        current + step
    } else {
        current - step
    }
}
