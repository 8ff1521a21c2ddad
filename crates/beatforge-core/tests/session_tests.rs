//! GameSession tests driven through the public API.

use beatforge_core::config::SessionConfig;
use beatforge_core::{
    Beatmap, BeatmapDifficulty, BeatmapMetadata, BeatmapTimingPoint, Error, GameSession, Grade,
    HitObject, HitResultType, Position, SessionState,
};

fn beatmap(times: &[f64]) -> Beatmap {
    let objects = times
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            HitObject::circle(
                format!("n{}", i),
                Position::new(100.0 + i as f64 * 30.0, 200.0),
                t,
                5.0,
            )
        })
        .collect();
    Beatmap::new(
        "map",
        BeatmapMetadata::default(),
        BeatmapDifficulty::default(),
        vec![BeatmapTimingPoint::new(0.0, 120.0)],
        objects,
    )
}

fn assert_sets_consistent(session: &GameSession) {
    for object in session.beatmap().hit_objects() {
        assert!(
            !(session.is_processed(&object.id) && session.is_missed(&object.id)),
            "{} judged twice",
            object.id
        );
    }
    assert!(session.processed_count() + session.missed_count() <= session.beatmap().total_notes());
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_two_hits_one_miss_then_completion() {
        let mut session = GameSession::new("s", beatmap(&[1000.0, 2000.0, 3000.0]));
        session.start(0.0).unwrap();

        let first = session
            .process_hit(Some(Position::new(100.0, 200.0)), 1000.0)
            .unwrap();
        let second = session
            .process_hit(Some(Position::new(130.0, 200.0)), 2000.0)
            .unwrap();
        assert_eq!(first.result_type, HitResultType::Perfect);
        assert_eq!(second.result_type, HitResultType::Perfect);

        assert_eq!(session.check_for_missed_objects(3201.0), 1);
        assert_eq!(session.missed_count(), 1);
        assert!(session.is_missed("n2"));
        assert_eq!(session.state(), SessionState::Playing);

        assert_eq!(session.update(4000.0), SessionState::Playing);
        assert_eq!(session.update(4201.0), SessionState::Completed);

        let stats = session.stats();
        assert_eq!(stats.score, 600);
        assert_eq!(stats.max_combo, 2);
        assert_eq!(stats.combo, 0);
        assert_eq!(stats.hit_counts.miss, 1);
        assert_sets_consistent(&session);
    }

    #[test]
    fn test_full_perfect_run() {
        let times: Vec<f64> = (0..8).map(|i| 1000.0 + i as f64 * 400.0).collect();
        let mut session = GameSession::new("s", beatmap(&times));
        session.start(250.0).unwrap();

        for &t in &times {
            session.process_hit(None, t + 250.0).unwrap();
            session.update(t + 250.0);
        }

        let score = session.score();
        assert_eq!(score.points, session.beatmap().max_score());
        assert!(score.is_full_combo());
        assert_eq!(score.calculate_grade(), Grade::Ss);
        assert_eq!(score.completion_rate(), 1.0);
    }

    #[test]
    fn test_repeated_ids_still_complete() {
        let map = Beatmap::new(
            "map",
            BeatmapMetadata::default(),
            BeatmapDifficulty::default(),
            Vec::new(),
            vec![
                HitObject::circle("dup", Position::center(), 1000.0, 5.0),
                HitObject::circle("dup", Position::center(), 2000.0, 5.0),
            ],
        );
        let mut session = GameSession::new("s", map);
        session.start(0.0).unwrap();

        assert!(session.process_hit(None, 1000.0).is_some());
        assert!(session.process_hit(None, 2000.0).is_some());
        assert_eq!(session.processed_count(), 2);
        assert_eq!(session.update(100_000.0), SessionState::Completed);
        assert_sets_consistent(&session);
    }
}

mod state_machine_tests {
    use super::*;

    #[test]
    fn test_failed_transition_leaves_session_unchanged() {
        let mut session = GameSession::new("s", beatmap(&[1000.0]));
        session.start(100.0).unwrap();
        session.process_hit(None, 1100.0).unwrap();

        let before = session.clone();
        let err = session.start(5000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidStateTransition { .. }));
        assert_eq!(session.state(), before.state());
        assert_eq!(session.start_time(), before.start_time());
        assert_eq!(session.score(), before.score());
    }

    #[test]
    fn test_completed_rejects_everything() {
        let mut session = GameSession::new("s", beatmap(&[1000.0, 2000.0]));
        session.start(0.0).unwrap();
        session.end();

        assert!(session.start(10.0).is_err());
        assert!(session.pause(10.0).is_err());
        assert!(session.process_hit(None, 1000.0).is_none());
        assert_eq!(session.check_for_missed_objects(9000.0), 0);
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_paused_time_not_counted_for_misses() {
        let mut session = GameSession::new("s", beatmap(&[1000.0]));
        session.start(0.0).unwrap();
        session.pause(500.0).unwrap();
        session.start(10_500.0).unwrap();

        // Session time 1150 at wall 11_150
        assert_eq!(session.check_for_missed_objects(11_150.0), 0);
        let result = session.process_hit(None, 11_150.0).unwrap();
        assert_eq!(result.result_type, HitResultType::Bad);
    }

    #[test]
    fn test_hit_after_resume_uses_adjusted_time() {
        let mut session = GameSession::new("s", beatmap(&[1000.0]));
        session.start(0.0).unwrap();
        session.pause(500.0).unwrap();
        session.start(10_500.0).unwrap();

        let result = session.process_hit(None, 11_010.0).unwrap();
        assert_eq!(result.result_type, HitResultType::Perfect);
    }
}

mod boundary_tests {
    use super::*;

    #[test]
    fn test_hit_then_sweep_at_exact_window_edge() {
        let mut session = GameSession::new("s", beatmap(&[1000.0]));
        session.start(0.0).unwrap();

        let result = session.process_hit(None, 1200.0).unwrap();
        assert_eq!(result.result_type, HitResultType::Miss);
        assert_eq!(session.check_for_missed_objects(1200.0), 0);
        assert!(session.is_processed("n0"));
        assert_sets_consistent(&session);
    }

    #[test]
    fn test_just_outside_window() {
        let mut session = GameSession::new("s", beatmap(&[1000.0]));
        session.start(0.0).unwrap();

        assert!(session.process_hit(None, 1200.5).is_none());
        assert_eq!(session.check_for_missed_objects(1200.5), 1);
        assert!(session.is_missed("n0"));
    }

    #[test]
    fn test_early_window_edge() {
        let mut session = GameSession::new("s", beatmap(&[1000.0]));
        session.start(0.0).unwrap();

        assert!(session.process_hit(None, 799.0).is_none());
        assert!(session.process_hit(None, 800.0).is_some());
    }

    #[test]
    fn test_custom_windows() {
        let config = SessionConfig {
            hit_window_ms: 100.0,
            miss_threshold_ms: 100.0,
            completion_delay_ms: 0.0,
            ..Default::default()
        };
        let mut session = GameSession::with_config("s", beatmap(&[1000.0]), config);
        session.start(0.0).unwrap();

        assert!(session.process_hit(None, 850.0).is_none());
        assert_eq!(session.check_for_missed_objects(1101.0), 1);
        assert_eq!(session.update(1101.0), SessionState::Completed);
    }

    #[test]
    fn test_sweep_idempotent_and_sets_disjoint() {
        let times: Vec<f64> = (0..20).map(|i| 500.0 + i as f64 * 100.0).collect();
        let mut session = GameSession::new("s", beatmap(&times));
        session.start(0.0).unwrap();

        let mut now = 0.0;
        while now < 3000.0 {
            now += 37.0;
            if (now as i64) % 3 == 0 {
                session.process_hit(None, now);
            }
            session.check_for_missed_objects(now);
            session.check_for_missed_objects(now);
            assert_sets_consistent(&session);
            let accuracy = session.score().accuracy();
            assert!((0.0..=1.0).contains(&accuracy));
        }

        assert_eq!(
            session.processed_count() + session.missed_count(),
            session.beatmap().total_notes()
        );
        assert_eq!(
            session.score().total_hits as usize,
            session.beatmap().total_notes()
        );
    }
}

mod visibility_tests {
    use super::*;

    #[test]
    fn test_visible_window_uses_first_object_approach() {
        let mut session = GameSession::new("s", beatmap(&[1000.0, 1500.0, 2100.0, 2300.0]));
        session.start(0.0).unwrap();

        // AR 5 approach is 1125ms: window [1000, 2125]
        let ids: Vec<&str> = session
            .visible_hit_objects(1000.0)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["n0", "n1", "n2"]);
    }

    #[test]
    fn test_passed_objects_not_visible() {
        let mut session = GameSession::new("s", beatmap(&[1000.0, 1500.0]));
        session.start(0.0).unwrap();
        let ids: Vec<&str> = session
            .visible_hit_objects(1100.0)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["n1"]);
    }
}
