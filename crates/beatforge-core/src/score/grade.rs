use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoStaticStr,
)]
pub enum Grade {
    #[default]
    F,
    D,
    C,
    B,
    A,
    S,
    #[strum(serialize = "SS")]
    #[serde(rename = "SS")]
    Ss,
}

impl Grade {
    /// Grade a play.
    ///
    /// - SS: accuracy 100%
    /// - S: accuracy >= 90%, perfect ratio >= 90% and no misses
    /// - A/B/C/D: accuracy >= 80/70/60/50%
    /// - F otherwise
    pub fn from_accuracy(accuracy: f64, perfect_ratio: f64, misses: u32) -> Self {
        if accuracy >= 1.0 {
            Self::Ss
        } else if accuracy >= 0.9 && perfect_ratio >= 0.9 && misses == 0 {
            Self::S
        } else if accuracy >= 0.8 {
            Self::A
        } else if accuracy >= 0.7 {
            Self::B
        } else if accuracy >= 0.6 {
            Self::C
        } else if accuracy >= 0.5 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
