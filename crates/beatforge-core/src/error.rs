use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot {action} a session in state {from}")]
    InvalidStateTransition {
        from: SessionState,
        action: &'static str,
    },

    #[error("Beatmap not found: {0}")]
    BeatmapNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Unknown generator style: {0}")]
    UnknownStyle(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the caller can surface this error and keep going
    /// (e.g. show "not found" in a menu) rather than abort.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BeatmapNotFound(_) | Self::SessionNotFound(_))
    }
}
