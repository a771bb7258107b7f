//! Configuration loading and error propagation

use motion_coach::{
    config::{Config, EXAMPLE_CONFIG},
    detector::{ExerciseKind, GestureDetector, GestureProfile},
    session::{ExerciseSession, SessionCounter},
    Error,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("motion_coach_{}_{name}", std::process::id()))
}

#[test]
fn test_config_file_round_trip() {
    let path = temp_path("round_trip.yaml");
    let mut config = Config::default();
    config.neck_tilt.goal = 4;
    config.head_rotation.calibration_frames = Some(15);
    config.monitor.strain_stale_ms = 6_000;

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.goal(ExerciseKind::NeckTilt), 4);
    assert_eq!(loaded.profile(ExerciseKind::HeadRotation).calibration_frames, Some(15));
    assert_eq!(loaded.monitor.strain_stale_ms, 6_000);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_missing_config_file() {
    let result = Config::from_file(temp_path("does_not_exist.yaml"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_example_config_loads_from_disk() {
    let path = temp_path("example.yaml");
    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();
    let config = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(config.validate().is_ok());
}

#[test]
fn test_wrong_field_type_is_config_error() {
    let result = Config::from_yaml("neck_tilt:\n  smoothing: 8\n  center: zero\n");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_bad_smoothing_is_filter_error() {
    let mut profile = GestureProfile::neck_tilt();
    profile.smoothing = "median:5".to_string();
    assert!(matches!(GestureDetector::new(profile), Err(Error::FilterError(_))));
}

#[test]
fn test_calibrated_shrug_needs_frames() {
    let mut profile = GestureProfile::shoulder_shrug();
    profile.calibration_frames = Some(0);
    assert!(matches!(GestureDetector::new(profile), Err(Error::DetectorError(_))));
}

#[test]
fn test_inverted_shrug_ratios_rejected() {
    let mut config = Config::default();
    config.shoulder_shrug.engage_ratio = 0.96;
    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    assert!(ExerciseSession::from_config(&config, ExerciseKind::ShoulderShrug).is_err());
}

#[test]
fn test_zero_goal_session_rejected() {
    assert!(matches!(
        SessionCounter::new(ExerciseKind::HeadRotation, 0),
        Err(Error::InvalidInput(_))
    ));
    assert!(ExerciseSession::new(GestureProfile::head_rotation(), 0, 3_000).is_err());
}

#[test]
fn test_unknown_exercise_name() {
    let err = "jumping_jacks".parse::<ExerciseKind>().unwrap_err();
    assert!(err.to_string().contains("jumping_jacks"));
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("bad".to_string());
    assert_eq!(err.to_string(), "Configuration error: bad");
    let err = Error::TraceError("line 4: eof".to_string());
    assert_eq!(err.to_string(), "Trace error: line 4: eof");
}
