use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

use crate::config::timing;

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
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HitResultType {
    Miss,
    Bad,
    Good,
    Great,
    Perfect,
}

impl HitResultType {
    /// Classify the absolute distance between click and object time
    pub fn from_offset(offset_ms: f64) -> Self {
        let offset = offset_ms.abs();
        if offset <= timing::PERFECT_WINDOW_MS {
            Self::Perfect
        } else if offset <= timing::GREAT_WINDOW_MS {
            Self::Great
        } else if offset <= timing::GOOD_WINDOW_MS {
            Self::Good
        } else if offset <= timing::BAD_WINDOW_MS {
            Self::Bad
        } else {
            Self::Miss
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::Perfect => 300,
            Self::Great => 100,
            Self::Good => 50,
            Self::Bad => 10,
            Self::Miss => 0,
        }
    }

    /// Weight of this judgement in the accuracy average
    pub fn accuracy(&self) -> f64 {
        match self {
            Self::Perfect => 1.0,
            Self::Great => 0.66,
            Self::Good => 0.33,
            Self::Bad => 0.1,
            Self::Miss => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for HitResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of evaluating one click against one hit object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    #[serde(rename = "type")]
    pub result_type: HitResultType,
    pub points: u32,
    pub accuracy: f64,
    pub timestamp: f64,
}

impl HitResult {
    pub fn new(result_type: HitResultType, timestamp: f64) -> Self {
        Self {
            result_type,
            points: result_type.points(),
            accuracy: result_type.accuracy(),
            timestamp,
        }
    }

    pub fn miss(timestamp: f64) -> Self {
        Self::new(HitResultType::Miss, timestamp)
    }

    pub fn is_miss(&self) -> bool {
        self.result_type == HitResultType::Miss
    }
}
