use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::beatmap::Beatmap;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::hit_object::{HitObject, HitResult, HitResultType, Position};
use crate::score::{Score, SessionStats};
use crate::session::{PlayRecord, SessionState};

/// One play of one beatmap.
///
/// ## Time
///
/// The session never reads a clock. Every call receives the caller's
/// timestamp (ms), and timestamps must not decrease over the session's
/// lifetime. Session time is `timestamp - start_time - total_paused_time`,
/// frozen at the pause instant while paused.
///
/// ## State Transition Rules
///
/// - Ready -> Playing (`start`)
/// - Playing -> Paused (`pause`)
/// - Paused -> Playing (`start`, pause duration is excluded from session time)
/// - any -> Completed (`end`, or the completion deadline passing)
///
/// ## Judgement
///
/// Every hit object is judged exactly once: either by `process_hit`
/// (processed set) or by the miss sweep (missed set). Within one tick
/// callers process input before sweeping, and an object exactly at the
/// hit window edge is still hittable while the sweep only takes objects
/// strictly past the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    id: String,
    beatmap: Beatmap,
    score: Score,
    state: SessionState,
    start_time: f64,
    paused_at: Option<f64>,
    total_paused_time: f64,
    processed_ids: HashSet<String>,
    missed_ids: HashSet<String>,
    /// Timestamp at which a fully judged session becomes Completed
    completion_deadline: Option<f64>,
    config: SessionConfig,
}

impl GameSession {
    pub fn new(id: impl Into<String>, beatmap: Beatmap) -> Self {
        Self::with_config(id, beatmap, SessionConfig::default())
    }

    pub fn with_config(id: impl Into<String>, beatmap: Beatmap, config: SessionConfig) -> Self {
        let score = Score::new(beatmap.total_notes() as u32);
        Self {
            id: id.into(),
            beatmap,
            score,
            state: SessionState::Ready,
            start_time: 0.0,
            paused_at: None,
            total_paused_time: 0.0,
            processed_ids: HashSet::new(),
            missed_ids: HashSet::new(),
            completion_deadline: None,
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn beatmap(&self) -> &Beatmap {
        &self.beatmap
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn total_paused_time(&self) -> f64 {
        self.total_paused_time
    }

    pub fn processed_count(&self) -> usize {
        self.processed_ids.len()
    }

    pub fn missed_count(&self) -> usize {
        self.missed_ids.len()
    }

    pub fn is_processed(&self, id: &str) -> bool {
        self.processed_ids.contains(id)
    }

    pub fn is_missed(&self, id: &str) -> bool {
        self.missed_ids.contains(id)
    }

    /// Whether the object has been judged either way
    pub fn is_judged(&self, id: &str) -> bool {
        self.is_processed(id) || self.is_missed(id)
    }

    pub fn completion_deadline(&self) -> Option<f64> {
        self.completion_deadline
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Begin play, or resume from a pause
    pub fn start(&mut self, timestamp: f64) -> Result<()> {
        if !self.state.can_start() {
            return Err(self.rejected(self.state, "start"));
        }

        if self.state == SessionState::Paused {
            if let Some(paused_at) = self.paused_at.take() {
                self.total_paused_time += timestamp - paused_at;
            }
            debug!(
                "Session {} resumed (paused {:.0}ms in total)",
                self.id, self.total_paused_time
            );
        } else {
            self.start_time = timestamp;
            info!("Session {} started at {}", self.id, timestamp);
        }

        self.state = SessionState::Playing;
        Ok(())
    }

    pub fn pause(&mut self, timestamp: f64) -> Result<()> {
        if !self.state.can_pause() {
            return Err(self.rejected(self.state, "pause"));
        }

        self.paused_at = Some(timestamp);
        self.state = SessionState::Paused;
        debug!("Session {} paused at {}", self.id, timestamp);
        Ok(())
    }

    /// Finish the session. Idempotent.
    pub fn end(&mut self) {
        if self.state == SessionState::Completed {
            return;
        }
        self.completion_deadline = None;
        self.complete();
    }

    fn complete(&mut self) {
        self.state = SessionState::Completed;
        info!(
            "Session {} completed: {} points, {} ({}/{} judged)",
            self.id,
            self.score.points,
            self.score.calculate_grade(),
            self.processed_ids.len() + self.missed_ids.len(),
            self.beatmap.total_notes()
        );
    }

    fn rejected(&self, from: SessionState, action: &'static str) -> Error {
        warn!("Session {}: cannot {} from {}", self.id, action, from);
        Error::InvalidStateTransition { from, action }
    }

    /// Session time for a caller timestamp
    pub fn current_time(&self, timestamp: f64) -> f64 {
        self.paused_at.unwrap_or(timestamp) - self.start_time - self.total_paused_time
    }

    /// Judge a click against the closest unjudged object within the hit window.
    ///
    /// `position` of `None` is a key press with no cursor: the closest object
    /// is judged as if clicked dead center, so only timing matters.
    /// Returns `None` when not playing or when nothing is in range.
    pub fn process_hit(&mut self, position: Option<Position>, timestamp: f64) -> Option<HitResult> {
        if self.state != SessionState::Playing {
            return None;
        }

        let current = self.current_time(timestamp);
        let index = self.closest_candidate(current)?;

        let object = self.beatmap.hit_object_mut(index)?;
        let click_position = position.unwrap_or(object.position);
        let result = object.evaluate(current, click_position);
        let id = object.id.clone();

        debug!(
            "Hit {} at {:.0}ms (offset {:+.0}ms): {}",
            id,
            current,
            current - object.time,
            result.result_type
        );

        self.processed_ids.insert(id);
        self.score.add_result(result.result_type, result.points);
        self.schedule_completion_if_done(timestamp);

        Some(result)
    }

    /// Index of the unjudged object closest to `current` within the hit window.
    /// Ties go to the earlier object.
    fn closest_candidate(&self, current: f64) -> Option<usize> {
        let window = self.config.hit_window_ms;
        let mut best: Option<(usize, f64)> = None;

        for (index, object) in self.beatmap.hit_objects().iter().enumerate() {
            if object.time > current + window {
                break;
            }
            if self.is_judged(&object.id) {
                continue;
            }
            let distance = (object.time - current).abs();
            if distance > window {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Record every unjudged object more than the miss threshold in the past
    /// as a MISS. Returns how many were newly missed.
    ///
    /// Also resolves a due completion deadline first.
    pub fn check_for_missed_objects(&mut self, timestamp: f64) -> usize {
        self.resolve_pending_completion(timestamp);

        if self.state != SessionState::Playing {
            return 0;
        }

        let cutoff = self.current_time(timestamp) - self.config.miss_threshold_ms;
        let mut newly_missed = 0;

        for object in self.beatmap.hit_objects() {
            if object.time >= cutoff {
                break;
            }
            if self.processed_ids.contains(&object.id) || self.missed_ids.contains(&object.id) {
                continue;
            }

            self.missed_ids.insert(object.id.clone());
            self.score.add_result(HitResultType::Miss, 0);
            newly_missed += 1;
            debug!("Missed {} (due at {:.0}ms)", object.id, object.time);
        }

        self.schedule_completion_if_done(timestamp);
        newly_missed
    }

    /// Per-frame driver: resolve completion, then sweep misses
    pub fn update(&mut self, timestamp: f64) -> SessionState {
        self.check_for_missed_objects(timestamp);
        self.state
    }

    fn schedule_completion_if_done(&mut self, timestamp: f64) {
        if self.completion_deadline.is_some() || self.state == SessionState::Completed {
            return;
        }

        let judged = self.processed_ids.len() + self.missed_ids.len();
        if judged >= self.beatmap.total_notes() {
            let deadline = timestamp + self.config.completion_delay_ms;
            debug!("Session {} fully judged, completing at {}", self.id, deadline);
            self.completion_deadline = Some(deadline);
        }
    }

    fn resolve_pending_completion(&mut self, timestamp: f64) {
        if self.state == SessionState::Completed {
            return;
        }
        match self.completion_deadline {
            Some(deadline) if timestamp >= deadline => {
                self.completion_deadline = None;
                self.complete();
            }
            _ => {}
        }
    }

    /// Unjudged objects due within the approach window from now.
    ///
    /// The window length is the first object's approach time for the whole
    /// beatmap. Empty unless playing or paused.
    pub fn visible_hit_objects(&self, timestamp: f64) -> Vec<&HitObject> {
        if !self.state.is_active() {
            return Vec::new();
        }

        let current = self.current_time(timestamp);
        let approach = self
            .beatmap
            .first_object()
            .map(HitObject::approach_time)
            .unwrap_or(self.config.default_approach_ms);

        self.beatmap
            .hit_objects()
            .iter()
            .skip_while(|o| o.time < current)
            .take_while(|o| o.time <= current + approach)
            .filter(|o| !self.is_judged(&o.id))
            .collect()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from(&self.score)
    }

    /// Result of this play, stamped with `now`
    pub fn play_record(&self, now: DateTime<Utc>) -> PlayRecord {
        let metadata = self.beatmap.metadata();
        PlayRecord {
            timestamp: now,
            session_id: self.id.clone(),
            beatmap_id: self.beatmap.id().to_string(),
            title: metadata.title.clone(),
            artist: metadata.artist.clone(),
            version: metadata.version.clone(),
            stats: self.stats(),
            completion_rate: self.score.completion_rate(),
            full_combo: self.score.is_full_combo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{BeatmapDifficulty, BeatmapMetadata, BeatmapTimingPoint};

    fn beatmap(times: &[f64]) -> Beatmap {
        let objects = times
            .iter()
            .enumerate()
            .map(|(i, &t)| HitObject::circle(format!("n{}", i), Position::center(), t, 5.0))
            .collect();
        Beatmap::new(
            "map",
            BeatmapMetadata::default(),
            BeatmapDifficulty::default(),
            vec![BeatmapTimingPoint::new(0.0, 120.0)],
            objects,
        )
    }

    fn playing(times: &[f64]) -> GameSession {
        let mut session = GameSession::new("s1", beatmap(times));
        session.start(0.0).unwrap();
        session
    }

    #[test]
    fn test_start_from_ready() {
        let mut session = GameSession::new("s1", beatmap(&[1000.0]));
        assert_eq!(session.state(), SessionState::Ready);
        session.start(500.0).unwrap();
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.start_time(), 500.0);
        assert_eq!(session.current_time(1500.0), 1000.0);
    }

    #[test]
    fn test_start_while_playing_fails_and_keeps_state() {
        let mut session = playing(&[1000.0]);
        let err = session.start(100.0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStateTransition {
                from: SessionState::Playing,
                action: "start"
            }
        ));
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.start_time(), 0.0);
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut session = GameSession::new("s1", beatmap(&[1000.0]));
        assert!(session.pause(0.0).is_err());
        session.start(0.0).unwrap();
        session.pause(100.0).unwrap();
        assert!(session.pause(200.0).is_err());
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn test_pause_freezes_and_resume_excludes_pause() {
        let mut session = playing(&[5000.0]);
        session.pause(1000.0).unwrap();
        assert_eq!(session.current_time(1000.0), 1000.0);
        assert_eq!(session.current_time(4000.0), 1000.0);

        session.start(4000.0).unwrap();
        assert_eq!(session.total_paused_time(), 3000.0);
        assert_eq!(session.current_time(4500.0), 1500.0);

        session.pause(5000.0).unwrap();
        session.start(6000.0).unwrap();
        assert_eq!(session.total_paused_time(), 4000.0);
        assert_eq!(session.current_time(6000.0), 2000.0);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut session = playing(&[1000.0]);
        session.end();
        assert_eq!(session.state(), SessionState::Completed);
        session.end();
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.start(0.0).is_err());
        assert!(session.pause(0.0).is_err());
    }

    #[test]
    fn test_end_from_ready() {
        let mut session = GameSession::new("s1", beatmap(&[1000.0]));
        session.end();
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_process_hit_requires_playing() {
        let mut session = GameSession::new("s1", beatmap(&[1000.0]));
        assert!(session.process_hit(Some(Position::center()), 1000.0).is_none());

        session.start(0.0).unwrap();
        session.pause(900.0).unwrap();
        assert!(session.process_hit(Some(Position::center()), 1000.0).is_none());
        assert_eq!(session.processed_count(), 0);
    }

    #[test]
    fn test_process_hit_nothing_in_window() {
        let mut session = playing(&[1000.0]);
        assert!(session.process_hit(Some(Position::center()), 500.0).is_none());
        assert_eq!(session.score().total_hits, 0);
    }

    #[test]
    fn test_process_hit_picks_closest() {
        let mut session = playing(&[1000.0, 1100.0]);
        let result = session.process_hit(Some(Position::center()), 1080.0).unwrap();
        assert!(session.is_processed("n1"));
        assert!(!session.is_processed("n0"));
        assert_eq!(result.result_type, HitResultType::Great);
    }

    #[test]
    fn test_process_hit_tie_goes_to_earlier() {
        let mut session = playing(&[1000.0, 1100.0]);
        session.process_hit(Some(Position::center()), 1050.0).unwrap();
        assert!(session.is_processed("n0"));
        assert!(!session.is_processed("n1"));
    }

    #[test]
    fn test_object_judged_once() {
        let mut session = playing(&[1000.0]);
        assert!(session.process_hit(Some(Position::center()), 1000.0).is_some());
        assert!(session.process_hit(Some(Position::center()), 1001.0).is_none());
        assert_eq!(session.score().total_hits, 1);
    }

    #[test]
    fn test_hit_outside_radius_is_processed_miss() {
        let mut session = playing(&[1000.0]);
        let far = Position::center().offset(80.0, 0.0);
        let result = session.process_hit(Some(far), 1010.0).unwrap();
        assert_eq!(result.result_type, HitResultType::Miss);
        assert!(session.is_processed("n0"));
        assert!(!session.is_missed("n0"));
        assert_eq!(session.score().current_combo, 0);
    }

    #[test]
    fn test_auto_aim_uses_object_position() {
        let mut session = playing(&[1000.0]);
        let result = session.process_hit(None, 1005.0).unwrap();
        assert_eq!(result.result_type, HitResultType::Perfect);
        assert_eq!(result.timestamp, 1005.0);
    }

    #[test]
    fn test_hit_uses_session_time() {
        let mut session = GameSession::new("s1", beatmap(&[1000.0]));
        session.start(10_000.0).unwrap();
        let result = session.process_hit(None, 11_000.0).unwrap();
        assert_eq!(result.result_type, HitResultType::Perfect);
    }

    #[test]
    fn test_miss_sweep() {
        let mut session = playing(&[1000.0, 2000.0]);
        assert_eq!(session.check_for_missed_objects(1200.0), 0);
        assert_eq!(session.check_for_missed_objects(1201.0), 1);
        assert!(session.is_missed("n0"));
        assert_eq!(session.score().hit_counts.miss, 1);
        assert_eq!(session.score().points, 0);
    }

    #[test]
    fn test_miss_sweep_idempotent() {
        let mut session = playing(&[1000.0, 1100.0, 5000.0]);
        assert_eq!(session.check_for_missed_objects(1500.0), 2);
        assert_eq!(session.check_for_missed_objects(1500.0), 0);
        assert_eq!(session.missed_count(), 2);
        assert_eq!(session.score().total_hits, 2);
    }

    #[test]
    fn test_miss_sweep_skips_processed() {
        let mut session = playing(&[1000.0, 1100.0]);
        session.process_hit(None, 1000.0).unwrap();
        assert_eq!(session.check_for_missed_objects(2000.0), 1);
        assert!(session.is_processed("n0"));
        assert!(session.is_missed("n1"));
        assert!(!session.is_missed("n0"));
    }

    #[test]
    fn test_miss_sweep_requires_playing() {
        let mut session = playing(&[1000.0]);
        session.pause(100.0).unwrap();
        assert_eq!(session.check_for_missed_objects(5000.0), 0);
        assert_eq!(session.missed_count(), 0);
    }

    #[test]
    fn test_hit_window_edge_beats_miss_sweep() {
        let mut session = playing(&[1000.0]);
        // Exactly 200ms late: hit processing first, then the sweep
        let result = session.process_hit(None, 1200.0);
        assert!(result.is_some());
        assert_eq!(session.check_for_missed_objects(1200.0), 0);
        assert!(session.is_processed("n0"));
        assert!(!session.is_missed("n0"));
    }

    #[test]
    fn test_sweep_at_edge_leaves_object_hittable() {
        let mut session = playing(&[1000.0]);
        assert_eq!(session.check_for_missed_objects(1200.0), 0);
        assert!(session.process_hit(None, 1200.0).is_some());
    }

    #[test]
    fn test_completion_after_grace_period() {
        let mut session = playing(&[1000.0, 1500.0, 2000.0]);
        session.process_hit(None, 1000.0).unwrap();
        session.process_hit(None, 1500.0).unwrap();

        assert_eq!(session.check_for_missed_objects(2300.0), 1);
        assert_eq!(session.missed_count(), 1);
        assert_eq!(session.completion_deadline(), Some(3300.0));
        assert_eq!(session.state(), SessionState::Playing);

        assert_eq!(session.update(3299.0), SessionState::Playing);
        assert_eq!(session.update(3300.0), SessionState::Completed);
    }

    #[test]
    fn test_completion_scheduled_by_last_hit() {
        let mut session = playing(&[1000.0]);
        session.process_hit(None, 1000.0).unwrap();
        assert_eq!(session.completion_deadline(), Some(2000.0));
        assert_eq!(session.update(2000.0), SessionState::Completed);
    }

    #[test]
    fn test_completion_resolves_while_paused() {
        let mut session = playing(&[1000.0]);
        session.process_hit(None, 1000.0).unwrap();
        session.pause(1100.0).unwrap();
        assert_eq!(session.update(2500.0), SessionState::Completed);
    }

    #[test]
    fn test_end_clears_pending_completion() {
        let mut session = playing(&[1000.0]);
        session.process_hit(None, 1000.0).unwrap();
        session.end();
        assert_eq!(session.completion_deadline(), None);
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_visible_hit_objects() {
        let mut session = GameSession::new("s1", beatmap(&[1000.0, 2000.0, 3000.0]));
        assert!(session.visible_hit_objects(0.0).is_empty());

        session.start(0.0).unwrap();
        // AR 5 approach is 1125ms: window [500, 1625]
        let visible: Vec<&str> = session
            .visible_hit_objects(500.0)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(visible, vec!["n0"]);

        session.process_hit(None, 1000.0).unwrap();
        let visible: Vec<&str> = session
            .visible_hit_objects(1000.0)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(visible, vec!["n1"]);

        session.pause(1000.0).unwrap();
        assert_eq!(session.visible_hit_objects(9000.0).len(), 1);

        session.end();
        assert!(session.visible_hit_objects(1000.0).is_empty());
    }

    #[test]
    fn test_empty_beatmap_completes() {
        let mut session = playing(&[]);
        assert!(session.visible_hit_objects(0.0).is_empty());
        session.update(0.0);
        assert_eq!(session.completion_deadline(), Some(1000.0));
        assert_eq!(session.update(1000.0), SessionState::Completed);
    }

    #[test]
    fn test_stats() {
        let mut session = playing(&[1000.0, 2000.0]);
        session.process_hit(None, 1000.0).unwrap();
        let stats = session.stats();
        assert_eq!(stats.score, 300);
        assert_eq!(stats.combo, 1);
        assert_eq!(stats.hit_counts.perfect, 1);
    }

    #[test]
    fn test_play_record() {
        let mut session = playing(&[1000.0, 2000.0]);
        session.process_hit(None, 1000.0).unwrap();
        session.end();

        let now = chrono::Utc::now();
        let record = session.play_record(now);
        assert_eq!(record.timestamp, now);
        assert_eq!(record.session_id, "s1");
        assert_eq!(record.beatmap_id, "map");
        assert_eq!(record.stats.score, 300);
        assert!((record.completion_rate - 0.5).abs() < 1e-9);
        assert!(!record.full_combo);
    }
}
