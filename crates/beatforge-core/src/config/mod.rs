//! Engine configuration.
//!
//! This module contains:
//! - Timing, playfield, and generation constants
//! - `Config` - the tunable subset, loadable from a TOML file

mod file;

pub use file::*;

/// Judgement and session timing constants (milliseconds).
pub mod timing {
    /// Upper bounds of the judgement windows, ascending:
    /// PERFECT, GREAT, GOOD, BAD. Anything later is a MISS.
    pub const PERFECT_WINDOW_MS: f64 = 16.0;
    pub const GREAT_WINDOW_MS: f64 = 64.0;
    pub const GOOD_WINDOW_MS: f64 = 127.0;
    pub const BAD_WINDOW_MS: f64 = 151.0;

    /// Half-width of the window in which a click may select a hit object.
    pub const HIT_WINDOW_MS: f64 = 200.0;

    /// How far in the past an unjudged object must be before it is swept as a miss.
    pub const MISS_THRESHOLD_MS: f64 = 200.0;

    /// Grace period between the last judgement and session completion.
    pub const COMPLETION_DELAY_MS: f64 = 1000.0;

    /// Approach time used for visibility when a beatmap has no objects.
    pub const DEFAULT_APPROACH_MS: f64 = 1200.0;

    /// Approach time at AR 0 and AR 10 respectively.
    pub const APPROACH_MAX_MS: f64 = 1800.0;
    pub const APPROACH_MIN_MS: f64 = 450.0;

    /// Silence appended after the last object when computing beatmap length.
    pub const END_BUFFER_MS: f64 = 3000.0;
}

/// Playfield geometry (osu! pixels).
pub mod playfield {
    pub const WIDTH: f64 = 512.0;
    pub const HEIGHT: f64 = 384.0;

    /// Default margin kept free along every edge when placing objects.
    pub const EDGE_PADDING: f64 = 50.0;

    /// Hit circle radius. Fixed, not derived from circle size.
    pub const DEFAULT_RADIUS: f64 = 54.0;
}

/// Procedural generation constants.
pub mod generation {
    pub const MIN_LEVEL: f64 = 1.0;
    pub const MAX_LEVEL: f64 = 10.0;
    pub const DEFAULT_LEVEL: f64 = 5.0;
    pub const DEFAULT_BPM: f64 = 120.0;
    pub const DEFAULT_METER: u32 = 4;

    /// Requested tempos above this are clamped down to it.
    pub const MAX_BPM: f64 = 1000.0;
    /// Shortest beat any strategy subdivides.
    pub const MIN_BEAT_MS: f64 = 60000.0 / MAX_BPM;

    /// Longest track generated (24 hours). Longer or non-finite durations are clamped.
    pub const MAX_DURATION_MS: f64 = 86_400_000.0;

    /// Objects start this far into the track and stop this far before its end.
    pub const LEAD_IN_MS: f64 = 1000.0;
    pub const LEAD_OUT_MS: f64 = 1000.0;

    /// Shortest gap the standard strategy will place between beats.
    pub const MIN_SPACING_MS: f64 = 150.0;

    /// Rejection-sampling attempts before falling back to an unconstrained position.
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10;

    /// Block length for the technical strategy.
    pub const TECHNICAL_BLOCK_MS: f64 = 5000.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judgement_windows_ascending() {
        assert!(timing::PERFECT_WINDOW_MS < timing::GREAT_WINDOW_MS);
        assert!(timing::GREAT_WINDOW_MS < timing::GOOD_WINDOW_MS);
        assert!(timing::GOOD_WINDOW_MS < timing::BAD_WINDOW_MS);
        assert!(timing::BAD_WINDOW_MS < timing::HIT_WINDOW_MS);
    }

    #[test]
    fn test_padding_fits_playfield() {
        assert!(playfield::EDGE_PADDING * 2.0 < playfield::WIDTH);
        assert!(playfield::EDGE_PADDING * 2.0 < playfield::HEIGHT);
    }
}
