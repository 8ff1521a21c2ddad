use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    #[default]
    Ready,
    Playing,
    Paused,
    /// Terminal
    Completed,
}

impl SessionState {
    /// Whether `start` is allowed from this state
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Ready | Self::Paused)
    }

    /// Whether `pause` is allowed from this state
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether the session's clock is running or frozen (as opposed to not
    /// yet started or finished)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
