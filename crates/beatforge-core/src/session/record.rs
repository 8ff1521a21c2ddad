use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::score::SessionStats;

/// Persisted outcome of one play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub beatmap_id: String,
    pub title: String,
    pub artist: String,
    pub version: String,
    pub stats: SessionStats,
    /// Judged objects over total objects, 0..=1
    pub completion_rate: f64,
    pub full_combo: bool,
}

impl PlayRecord {
    /// One-line result summary for logs and terminals
    pub fn summary_line(&self) -> String {
        format!(
            "{} - {} [{}]: {} {} ({}, max combo {}){}",
            self.artist,
            self.title,
            self.version,
            self.stats.grade,
            self.stats.score,
            self.stats.accuracy_percent(),
            self.stats.max_combo,
            if self.full_combo { " FC" } else { "" }
        )
    }
}
