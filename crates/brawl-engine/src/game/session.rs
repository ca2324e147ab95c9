/// Top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    LevelCompleted,
    GameOver,
    Victory,
}

impl GameState {
    /// Numeric code sent to the host in `STATE_CHANGED` events.
    pub fn code(self) -> u32 {
        match self {
            GameState::Menu => 0,
            GameState::Playing => 1,
            GameState::Paused => 2,
            GameState::LevelCompleted => 3,
            GameState::GameOver => 4,
            GameState::Victory => 5,
        }
    }

    /// States that draw the level underneath.
    pub fn shows_world(self) -> bool {
        matches!(
            self,
            GameState::Playing | GameState::Paused | GameState::LevelCompleted
        )
    }
}

/// Progress of one play-through.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub state: GameState,
    /// 0-based index of the current level.
    pub level_index: usize,
    pub score: u32,
    pub levels_completed: u32,
    /// Seconds spent in `Playing`.
    pub play_time: f32,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            state: GameState::Menu,
            level_index: 0,
            score: 0,
            levels_completed: 0,
            play_time: 0.0,
        }
    }

    /// Start a fresh run from the first level. State is left to the caller.
    pub fn restart_run(&mut self) {
        self.level_index = 0;
        self.score = 0;
        self.levels_completed = 0;
        self.play_time = 0.0;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// 1-based ordinal of the current level.
    pub fn ordinal(&self) -> u32 {
        self.level_index as u32 + 1
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_in_menu() {
        let s = GameSession::new();
        assert_eq!(s.state, GameState::Menu);
        assert_eq!(s.ordinal(), 1);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn restart_clears_progress() {
        let mut s = GameSession::new();
        s.add_score(500);
        s.level_index = 3;
        s.levels_completed = 3;
        s.play_time = 42.0;
        s.restart_run();
        assert_eq!(s, GameSession::new());
    }

    #[test]
    fn score_saturates() {
        let mut s = GameSession::new();
        s.add_score(u32::MAX);
        s.add_score(10);
        assert_eq!(s.score, u32::MAX);
    }
}
