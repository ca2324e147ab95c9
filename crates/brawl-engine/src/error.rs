//! Error type for the few operations that can genuinely fail.
//!
//! Expected absences (no physics, no active level, no player) are modelled as
//! `Option` at the call site and never reach this type.

/// Errors surfaced while configuring or loading the game.
#[derive(Debug)]
pub enum GameError {
    /// A level index outside the configured range was requested.
    InvalidLevel { index: usize, count: usize },
    /// A level layout could not be applied.
    LevelSetup { ordinal: u32, reason: String },
    /// JSON configuration could not be parsed.
    Config(serde_json::Error),
}

impl GameError {
    pub(crate) fn setup(ordinal: u32, reason: impl Into<String>) -> Self {
        GameError::LevelSetup {
            ordinal,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidLevel { index, count } => {
                write!(f, "level index {index} out of range (0..{count})")
            }
            GameError::LevelSetup { ordinal, reason } => {
                write!(f, "level {ordinal} setup failed: {reason}")
            }
            GameError::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e)
    }
}
