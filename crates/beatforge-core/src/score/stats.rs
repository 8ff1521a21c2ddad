use serde::{Deserialize, Serialize};

use crate::score::{Grade, HitCounts, Score};

/// Snapshot of a session's score for HUDs and result screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub accuracy: f64,
    pub grade: Grade,
    pub hit_counts: HitCounts,
}

impl From<&Score> for SessionStats {
    fn from(score: &Score) -> Self {
        Self {
            score: score.points,
            combo: score.current_combo,
            max_combo: score.max_combo,
            accuracy: score.accuracy(),
            grade: score.calculate_grade(),
            hit_counts: score.hit_counts,
        }
    }
}

impl SessionStats {
    /// Accuracy as a percentage string, e.g. "97.28%"
    pub fn accuracy_percent(&self) -> String {
        format!("{:.2}%", self.accuracy * 100.0)
    }
}
