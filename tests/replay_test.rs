//! Replaying JSON-lines traces through the application

mod test_helpers;

use motion_coach::{
    app::{AppConfig, CoachApp},
    detector::ExerciseKind,
    events::{CoachEvent, EventLog},
};
use test_helpers::{face_frame, frames, hold, oscillation, tilt_frame, to_trace, FRAME_MS};

#[test]
fn test_replay_stops_at_goal() {
    let values = oscillation(0.0, 20.0, 20, 4);
    let trace = frames(0, &values, tilt_frame);
    let mut app = CoachApp::new(AppConfig {
        goal: Some(3),
        ..AppConfig::new(ExerciseKind::NeckTilt)
    })
    .unwrap();

    let mut log = EventLog::new();
    let summary = app.run(to_trace(&trace).as_bytes(), &mut log).unwrap();

    assert_eq!(summary.rep_count, 3);
    assert_eq!(summary.reward_points, 30);
    assert!(summary.completed);
    assert!(summary.frames < trace.len());
    assert_eq!(log.completions().count(), 1);
}

#[test]
fn test_replay_discards_unfinished_session() {
    let values = oscillation(0.0, 20.0, 20, 1);
    let mut app = CoachApp::new(AppConfig::new(ExerciseKind::NeckTilt)).unwrap();
    let mut log = EventLog::new();
    let summary = app
        .run(to_trace(&frames(0, &values, tilt_frame)).as_bytes(), &mut log)
        .unwrap();

    assert_eq!(summary.rep_count, 2);
    assert!(!summary.completed);
    assert_eq!(log.completions().count(), 0);
    assert!(app.session().is_closed());
}

#[test]
fn test_replay_finish_at_end_keeps_result() {
    let values = oscillation(0.0, 20.0, 20, 1);
    let mut app = CoachApp::new(AppConfig {
        finish_at_end: true,
        ..AppConfig::new(ExerciseKind::NeckTilt)
    })
    .unwrap();
    let mut log = EventLog::new();
    let summary = app
        .run(to_trace(&frames(0, &values, tilt_frame)).as_bytes(), &mut log)
        .unwrap();

    assert!(summary.completed);
    let record = log.completions().next().unwrap();
    assert!(record.forced);
    assert_eq!(record.rep_count, 2);
}

#[test]
fn test_replay_with_monitor_counts_blinks() {
    // Pose and face in every frame; eyes close briefly every 2 s
    let mut values = Vec::new();
    for _ in 0..5 {
        values.extend(hold(0.3, 55));
        values.extend(hold(0.05, 5));
    }
    let trace: Vec<_> = frames(0, &values, face_frame)
        .into_iter()
        .map(|mut frame| {
            frame.pose = tilt_frame(frame.timestamp_ms, 0.0).pose;
            frame
        })
        .collect();

    let mut app = CoachApp::new(AppConfig {
        monitor: true,
        ..AppConfig::new(ExerciseKind::NeckTilt)
    })
    .unwrap();
    let mut log = EventLog::new();
    let summary = app.run(to_trace(&trace).as_bytes(), &mut log).unwrap();

    assert_eq!(summary.session_blinks, 5);
    assert_eq!(summary.frames, 300);
    let updates = log
        .events
        .iter()
        .filter(|e| matches!(e, CoachEvent::Monitoring(_)))
        .count();
    assert_eq!(updates, 10);
}

#[test]
fn test_replay_skips_comments_and_out_of_order_frames() {
    let mut lines = String::from("# recorded trace\n\n");
    lines.push_str(&to_trace(&[tilt_frame(100, 0.0), tilt_frame(50, 0.0), tilt_frame(133, 0.0)]));
    let mut app = CoachApp::new(AppConfig::new(ExerciseKind::NeckTilt)).unwrap();
    let summary = app.run(lines.as_bytes(), &mut EventLog::new()).unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.out_of_order, 1);
}

#[test]
fn test_events_serialize_with_tags() {
    let values = oscillation(0.0, 20.0, 20, 1);
    let mut app = CoachApp::new(AppConfig {
        goal: Some(1),
        ..AppConfig::new(ExerciseKind::NeckTilt)
    })
    .unwrap();
    let mut log = EventLog::new();
    app.run(to_trace(&frames(0, &values, tilt_frame)).as_bytes(), &mut log)
        .unwrap();

    let json: Vec<serde_json::Value> = log
        .events
        .iter()
        .map(|e| serde_json::to_value(e).unwrap())
        .collect();
    let repetition = json.iter().find(|v| v["event"] == "repetition").unwrap();
    assert_eq!(repetition["exercise"], "neck_tilt");
    assert_eq!(repetition["direction"], "right");
    assert_eq!(repetition["rep_count"], 1);

    let complete = json.iter().find(|v| v["event"] == "session_complete").unwrap();
    assert_eq!(complete["reward_points"], 10);
    assert_eq!(complete["completed_at_ms"], 26 * FRAME_MS);
    assert_eq!(json[0]["event"], "feedback");
    assert_eq!(json[0]["feedback"]["speak"], true);
}
