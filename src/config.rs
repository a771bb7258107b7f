//! Configuration management for the motion coach

use crate::{
    constants::{
        DEFAULT_CALIBRATION_FRAMES, ROTATION_CENTER, ROTATION_ENGAGE_HIGH, ROTATION_ENGAGE_LOW, ROTATION_GOAL,
        ROTATION_RESET_HIGH, ROTATION_RESET_LOW, ROTATION_REWARD, ROTATION_VOCAL_COOLDOWN_MS, ROTATION_WINDOW,
        SHRUG_ENGAGE_RATIO, SHRUG_GOAL, SHRUG_RELEASE_RATIO, SHRUG_REWARD, SHRUG_VOCAL_COOLDOWN_MS, SHRUG_WINDOW,
        TILT_CENTER, TILT_ENGAGE_HIGH, TILT_ENGAGE_LOW, TILT_GOAL, TILT_RESET_HIGH, TILT_RESET_LOW, TILT_REWARD,
        TILT_VOCAL_COOLDOWN_MS, TILT_WINDOW,
    },
    detector::{CreditPolicy, ExerciseKind, GestureProfile, Thresholds},
    filters::{create_filter, SignalFilter},
    monitor::MonitorSettings,
    signals::SignalKind,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landmark handling
    pub landmarks: LandmarkConfig,

    /// Neck tilt exercise
    pub neck_tilt: DirectionalConfig,

    /// Head rotation exercise
    pub head_rotation: DirectionalConfig,

    /// Shoulder shrug exercise
    pub shoulder_shrug: ShrugConfig,

    /// Blink / strain / mood monitor
    pub monitor: MonitorSettings,
}

/// Landmark handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkConfig {
    /// Landmarks below this visibility are treated as missing (0.0-1.0)
    pub min_visibility: f64,
}

/// Left/right gesture with a symmetric hysteresis band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionalConfig {
    /// Smoothing filter spec, e.g. `moving_average:8`
    pub smoothing: String,

    /// Signal value at rest
    pub center: f64,

    /// Engage the left side strictly below this value
    pub engage_low: f64,

    /// Engage the right side strictly above this value
    pub engage_high: f64,

    /// Reset band, exclusive on both ends
    pub reset_low: f64,
    pub reset_high: f64,

    /// Reward per credited repetition
    pub reward_per_rep: u32,

    /// Repetitions to complete the session
    pub goal: u32,

    /// Minimum gap between spoken prompts (ms)
    pub vocal_cooldown_ms: u64,

    /// Measure the rest value and move every bound by `baseline - center`
    pub calibration_frames: Option<usize>,
}

/// Shoulder shrug thresholds relative to a calibrated baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShrugConfig {
    /// Smoothing filter spec
    pub smoothing: String,

    /// Frames used to measure the baseline
    pub calibration_frames: usize,

    /// Shrug engages below `baseline * engage_ratio`
    pub engage_ratio: f64,

    /// Shrug releases above `baseline * release_ratio`
    pub release_ratio: f64,

    /// Reward per credited repetition
    pub reward_per_rep: u32,

    /// Repetitions to complete the session
    pub goal: u32,

    /// Minimum gap between spoken prompts (ms)
    pub vocal_cooldown_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            landmarks: LandmarkConfig::default(),
            neck_tilt: DirectionalConfig::neck_tilt(),
            head_rotation: DirectionalConfig::head_rotation(),
            shoulder_shrug: ShrugConfig::default(),
            monitor: MonitorSettings::default(),
        }
    }
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self { min_visibility: 0.0 }
    }
}

impl DirectionalConfig {
    /// Defaults for the neck tilt exercise
    #[must_use]
    pub fn neck_tilt() -> Self {
        Self {
            smoothing: format!("moving_average:{TILT_WINDOW}"),
            center: TILT_CENTER,
            engage_low: TILT_ENGAGE_LOW,
            engage_high: TILT_ENGAGE_HIGH,
            reset_low: TILT_RESET_LOW,
            reset_high: TILT_RESET_HIGH,
            reward_per_rep: TILT_REWARD,
            goal: TILT_GOAL,
            vocal_cooldown_ms: TILT_VOCAL_COOLDOWN_MS,
            calibration_frames: None,
        }
    }

    /// Defaults for the head rotation exercise
    #[must_use]
    pub fn head_rotation() -> Self {
        Self {
            smoothing: format!("moving_average:{ROTATION_WINDOW}"),
            center: ROTATION_CENTER,
            engage_low: ROTATION_ENGAGE_LOW,
            engage_high: ROTATION_ENGAGE_HIGH,
            reset_low: ROTATION_RESET_LOW,
            reset_high: ROTATION_RESET_HIGH,
            reward_per_rep: ROTATION_REWARD,
            goal: ROTATION_GOAL,
            vocal_cooldown_ms: ROTATION_VOCAL_COOLDOWN_MS,
            calibration_frames: None,
        }
    }
}

impl Default for ShrugConfig {
    fn default() -> Self {
        Self {
            smoothing: format!("moving_average:{SHRUG_WINDOW}"),
            calibration_frames: DEFAULT_CALIBRATION_FRAMES,
            engage_ratio: SHRUG_ENGAGE_RATIO,
            release_ratio: SHRUG_RELEASE_RATIO,
            reward_per_rep: SHRUG_REWARD,
            goal: SHRUG_GOAL,
            vocal_cooldown_ms: SHRUG_VOCAL_COOLDOWN_MS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Detector profile for an exercise
    #[must_use]
    pub fn profile(&self, exercise: ExerciseKind) -> GestureProfile {
        let min_visibility = self.landmarks.min_visibility;
        match exercise {
            ExerciseKind::NeckTilt | ExerciseKind::HeadRotation => {
                let (section, signal, base) = if exercise == ExerciseKind::NeckTilt {
                    (&self.neck_tilt, SignalKind::EarTilt, GestureProfile::neck_tilt())
                } else {
                    (&self.head_rotation, SignalKind::NoseRotation, GestureProfile::head_rotation())
                };
                GestureProfile {
                    signal,
                    smoothing: section.smoothing.clone(),
                    thresholds: Thresholds::Bidirectional {
                        center: section.center,
                        engage_low: section.engage_low,
                        engage_high: section.engage_high,
                        reset_low: section.reset_low,
                        reset_high: section.reset_high,
                    },
                    credit: CreditPolicy::OnEngage,
                    reward_per_rep: section.reward_per_rep,
                    calibration_frames: section.calibration_frames,
                    min_visibility,
                    ..base
                }
            }
            ExerciseKind::ShoulderShrug => GestureProfile {
                smoothing: self.shoulder_shrug.smoothing.clone(),
                thresholds: Thresholds::BaselineRatio {
                    engage_ratio: self.shoulder_shrug.engage_ratio,
                    release_ratio: self.shoulder_shrug.release_ratio,
                },
                reward_per_rep: self.shoulder_shrug.reward_per_rep,
                calibration_frames: Some(self.shoulder_shrug.calibration_frames),
                min_visibility,
                ..GestureProfile::shoulder_shrug()
            },
        }
    }

    /// Repetition goal for an exercise
    #[must_use]
    pub const fn goal(&self, exercise: ExerciseKind) -> u32 {
        match exercise {
            ExerciseKind::NeckTilt => self.neck_tilt.goal,
            ExerciseKind::HeadRotation => self.head_rotation.goal,
            ExerciseKind::ShoulderShrug => self.shoulder_shrug.goal,
        }
    }

    /// Voice cooldown for an exercise
    #[must_use]
    pub const fn vocal_cooldown_ms(&self, exercise: ExerciseKind) -> u64 {
        match exercise {
            ExerciseKind::NeckTilt => self.neck_tilt.vocal_cooldown_ms,
            ExerciseKind::HeadRotation => self.head_rotation.vocal_cooldown_ms,
            ExerciseKind::ShoulderShrug => self.shoulder_shrug.vocal_cooldown_ms,
        }
    }

    /// Monitor settings with the shared landmark visibility applied
    #[must_use]
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            min_visibility: self.landmarks.min_visibility,
            ..self.monitor.clone()
        }
    }

    /// Create the smoothing filter configured for an exercise
    pub fn create_filter(&self, exercise: ExerciseKind) -> Result<Box<dyn SignalFilter>> {
        create_filter(&self.profile(exercise).smoothing)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.landmarks.min_visibility) {
            return Err(Error::ConfigError(
                "Minimum visibility must be between 0.0 and 1.0".to_string(),
            ));
        }

        for exercise in ExerciseKind::ALL {
            if self.goal(exercise) == 0 {
                return Err(Error::ConfigError(format!("{exercise}: goal must be greater than 0")));
            }
            self.create_filter(exercise)
                .map_err(|e| Error::ConfigError(format!("{exercise}: {e}")))?;
            self.profile(exercise)
                .validate()
                .map_err(|e| Error::ConfigError(e.to_string()))?;
        }

        self.monitor_settings().validate()
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Motion Coach Configuration

# Landmark handling
landmarks:
  min_visibility: 0.0

# Neck tilt: ear-line angle in degrees
neck_tilt:
  smoothing: "moving_average:8"
  center: 0.0
  engage_low: -16.0
  engage_high: 16.0
  reset_low: -10.0
  reset_high: 10.0
  reward_per_rep: 10
  goal: 10
  vocal_cooldown_ms: 2500
  calibration_frames: null

# Head rotation: nose position within the ear span
head_rotation:
  smoothing: "moving_average:6"
  center: 0.5
  engage_low: 0.35
  engage_high: 0.65
  reset_low: 0.42
  reset_high: 0.58
  reward_per_rep: 15
  goal: 10
  vocal_cooldown_ms: 3000
  calibration_frames: null

# Shoulder shrug: thresholds relative to a measured baseline
shoulder_shrug:
  smoothing: "moving_average:5"
  calibration_frames: 30
  engage_ratio: 0.8
  release_ratio: 0.95
  reward_per_rep: 15
  goal: 20
  vocal_cooldown_ms: 2500

# Blink, eye strain and mood
monitor:
  ear_threshold: 0.12
  refractory_ms: 300
  rate_window_ms: 60000
  strain_min_blinks: 8
  strain_stale_ms: 8000
  report_interval_frames: 30
  stressed_brow_distance: 0.042
  happy_lip_curvature: -0.012
  min_visibility: 0.0
"#;
