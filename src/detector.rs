//! Gesture detection state machine.
//!
//! All camera exercises share one two-state machine (`Neutral` / `Engaged`)
//! over a smoothed scalar signal. What differs per exercise is captured in a
//! [`GestureProfile`]: which signal to derive, how to smooth it, where the
//! engage and reset thresholds sit, and whether a repetition is credited when
//! the gesture starts or when it is released.
//!
//! Thresholds use hysteresis: the reset band is strictly inside the engage
//! band, so a signal hovering near one boundary cannot toggle the state on
//! every frame.

use crate::{
    calibration::{BaselineCalibrator, CalibrationStatus},
    constants::{
        DEFAULT_CALIBRATION_FRAMES, ROTATION_CENTER, ROTATION_ENGAGE_HIGH, ROTATION_ENGAGE_LOW, ROTATION_RESET_HIGH,
        ROTATION_RESET_LOW, ROTATION_REWARD, ROTATION_WINDOW, SHRUG_ENGAGE_RATIO, SHRUG_RELEASE_RATIO, SHRUG_REWARD,
        SHRUG_WINDOW, TILT_CENTER, TILT_ENGAGE_HIGH, TILT_ENGAGE_LOW, TILT_RESET_HIGH, TILT_RESET_LOW, TILT_REWARD,
        TILT_WINDOW,
    },
    filters::{create_filter, SignalFilter},
    landmarks::LandmarkFrame,
    signals::SignalKind,
    Error, Result,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Camera-driven exercise types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Lateral neck tilt toward each shoulder
    NeckTilt,
    /// Head rotation left and right
    HeadRotation,
    /// Shoulder shrug and release
    ShoulderShrug,
}

impl ExerciseKind {
    pub const ALL: [Self; 3] = [Self::NeckTilt, Self::HeadRotation, Self::ShoulderShrug];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NeckTilt => "neck_tilt",
            Self::HeadRotation => "head_rotation",
            Self::ShoulderShrug => "shoulder_shrug",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "neck_tilt" | "tilt" => Ok(Self::NeckTilt),
            "head_rotation" | "head_movement" | "rotation" => Ok(Self::HeadRotation),
            "shoulder_shrug" | "shrug" => Ok(Self::ShoulderShrug),
            _ => Err(Error::InvalidInput(format!("Unknown exercise: {s}"))),
        }
    }
}

/// Side of a directional gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    #[default]
    Neutral,
    /// Mid-repetition; directional gestures record which side
    Engaged(Option<Direction>),
}

/// When a repetition is credited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditPolicy {
    /// On `Neutral -> Engaged`
    OnEngage,
    /// On `Engaged -> Neutral`, rewarding the completed motion
    OnRelease,
}

/// Threshold layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Thresholds {
    /// Engage `Left` when `s < engage_low`, `Right` when `s > engage_high`;
    /// reset while `reset_low < s < reset_high`. All comparisons are strict.
    ///
    /// With calibration enabled every bound moves by `baseline - center`.
    Bidirectional {
        center: f64,
        engage_low: f64,
        engage_high: f64,
        reset_low: f64,
        reset_high: f64,
    },
    /// Engage below `baseline * engage_ratio`, release above
    /// `baseline * release_ratio`. Requires calibration.
    BaselineRatio { engage_ratio: f64, release_ratio: f64 },
}

/// Per-gesture configuration record
#[derive(Debug, Clone, PartialEq)]
pub struct GestureProfile {
    pub exercise: ExerciseKind,
    pub signal: SignalKind,
    /// Filter spec understood by [`create_filter`]
    pub smoothing: String,
    pub thresholds: Thresholds,
    pub credit: CreditPolicy,
    pub reward_per_rep: u32,
    /// Frames used to establish a personal baseline, if any
    pub calibration_frames: Option<usize>,
    /// Landmarks below this visibility count as missing
    pub min_visibility: f64,
}

impl GestureProfile {
    /// Ear-line angle, 8-frame average, engage beyond ±16°, reset inside ±10°
    #[must_use]
    pub fn neck_tilt() -> Self {
        Self {
            exercise: ExerciseKind::NeckTilt,
            signal: SignalKind::EarTilt,
            smoothing: format!("moving_average:{TILT_WINDOW}"),
            thresholds: Thresholds::Bidirectional {
                center: TILT_CENTER,
                engage_low: TILT_ENGAGE_LOW,
                engage_high: TILT_ENGAGE_HIGH,
                reset_low: TILT_RESET_LOW,
                reset_high: TILT_RESET_HIGH,
            },
            credit: CreditPolicy::OnEngage,
            reward_per_rep: TILT_REWARD,
            calibration_frames: None,
            min_visibility: 0.0,
        }
    }

    /// Nose position in the ear span, 6-frame average, engage outside 0.35..0.65, reset inside 0.42..0.58
    #[must_use]
    pub fn head_rotation() -> Self {
        Self {
            exercise: ExerciseKind::HeadRotation,
            signal: SignalKind::NoseRotation,
            smoothing: format!("moving_average:{ROTATION_WINDOW}"),
            thresholds: Thresholds::Bidirectional {
                center: ROTATION_CENTER,
                engage_low: ROTATION_ENGAGE_LOW,
                engage_high: ROTATION_ENGAGE_HIGH,
                reset_low: ROTATION_RESET_LOW,
                reset_high: ROTATION_RESET_HIGH,
            },
            credit: CreditPolicy::OnEngage,
            reward_per_rep: ROTATION_REWARD,
            calibration_frames: None,
            min_visibility: 0.0,
        }
    }

    /// Shoulder elevation ratio against a 30-frame baseline, credited on release
    #[must_use]
    pub fn shoulder_shrug() -> Self {
        Self {
            exercise: ExerciseKind::ShoulderShrug,
            signal: SignalKind::ShoulderElevation,
            smoothing: format!("moving_average:{SHRUG_WINDOW}"),
            thresholds: Thresholds::BaselineRatio {
                engage_ratio: SHRUG_ENGAGE_RATIO,
                release_ratio: SHRUG_RELEASE_RATIO,
            },
            credit: CreditPolicy::OnRelease,
            reward_per_rep: SHRUG_REWARD,
            calibration_frames: Some(DEFAULT_CALIBRATION_FRAMES),
            min_visibility: 0.0,
        }
    }

    /// Built-in profile for an exercise
    #[must_use]
    pub fn for_exercise(exercise: ExerciseKind) -> Self {
        match exercise {
            ExerciseKind::NeckTilt => Self::neck_tilt(),
            ExerciseKind::HeadRotation => Self::head_rotation(),
            ExerciseKind::ShoulderShrug => Self::shoulder_shrug(),
        }
    }

    /// Check that thresholds leave a hysteresis gap and calibration is present where needed
    pub fn validate(&self) -> Result<()> {
        match self.thresholds {
            Thresholds::Bidirectional {
                center,
                engage_low,
                engage_high,
                reset_low,
                reset_high,
            } => {
                let bounds = [engage_low, reset_low, center, reset_high, engage_high];
                let ordered = bounds.windows(2).all(|pair| pair[0] < pair[1]);
                if !ordered || bounds.iter().any(|b| !b.is_finite()) {
                    return Err(Error::DetectorError(format!(
                        "{}: bounds must satisfy engage_low < reset_low < center < reset_high < engage_high \
                         ({engage_low}, {reset_low}, {center}, {reset_high}, {engage_high})",
                        self.exercise
                    )));
                }
            }
            Thresholds::BaselineRatio {
                engage_ratio,
                release_ratio,
            } => {
                if !(engage_ratio > 0.0 && engage_ratio < release_ratio && release_ratio <= 1.0) {
                    return Err(Error::DetectorError(format!(
                        "{}: ratios must satisfy 0 < engage < release <= 1 ({engage_ratio}, {release_ratio})",
                        self.exercise
                    )));
                }
                if self.calibration_frames.is_none() {
                    return Err(Error::DetectorError(format!(
                        "{}: baseline-relative thresholds need calibration frames",
                        self.exercise
                    )));
                }
            }
        }
        if self.calibration_frames == Some(0) {
            return Err(Error::DetectorError(format!(
                "{}: calibration needs at least one frame",
                self.exercise
            )));
        }
        Ok(())
    }
}

/// Kind of state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Engage,
    Release,
}

/// A state change produced by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Side engaged or released; `None` for non-directional gestures
    pub direction: Option<Direction>,
    /// Whether this transition credits a repetition
    pub credited: bool,
    /// Smoothed signal at the transition
    pub signal: f64,
}

/// Result of feeding one frame or sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Required landmarks missing or geometry degenerate; nothing changed
    Skipped,
    /// Baseline still being measured
    Calibrating { observed: usize, required: usize },
    /// Thresholds evaluated
    Evaluated {
        signal: f64,
        /// 0-100 progress toward the engage threshold (baseline-ratio gestures)
        tension: Option<f64>,
        transition: Option<Transition>,
    },
}

impl FrameOutcome {
    /// Transition produced, if any
    #[must_use]
    pub const fn transition(&self) -> Option<Transition> {
        match self {
            Self::Evaluated { transition, .. } => *transition,
            _ => None,
        }
    }
}

/// One detector instance; owns its window, baseline and state exclusively
pub struct GestureDetector {
    profile: GestureProfile,
    filter: Box<dyn SignalFilter>,
    calibrator: Option<BaselineCalibrator>,
    state: DetectorState,
    last_direction: Option<Direction>,
    credited: u32,
}

impl GestureDetector {
    /// Create a detector for a validated profile
    pub fn new(profile: GestureProfile) -> Result<Self> {
        profile.validate()?;
        let filter = create_filter(&profile.smoothing)?;
        let calibrator = profile.calibration_frames.map(BaselineCalibrator::new);
        debug!(
            "Created {} detector ({}, calibration: {:?})",
            profile.exercise,
            filter.name(),
            profile.calibration_frames
        );
        Ok(Self {
            profile,
            filter,
            calibrator,
            state: DetectorState::Neutral,
            last_direction: None,
            credited: 0,
        })
    }

    /// Derive the signal from a frame and advance the state machine
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameOutcome {
        match self.profile.signal.extract(frame, self.profile.min_visibility) {
            Some(value) => self.process_signal(value),
            None => {
                trace!("{}: frame {} skipped", self.profile.exercise, frame.timestamp_ms);
                FrameOutcome::Skipped
            }
        }
    }

    /// Advance the state machine with an already-derived raw signal value
    pub fn process_signal(&mut self, value: f64) -> FrameOutcome {
        if !value.is_finite() {
            return FrameOutcome::Skipped;
        }
        let smoothed = self.filter.apply(value);

        let baseline = match self.calibrator.as_mut().map(|c| c.observe(smoothed)) {
            Some(CalibrationStatus::Calibrating { observed, required }) => {
                return FrameOutcome::Calibrating { observed, required };
            }
            Some(CalibrationStatus::Ready(baseline)) => Some(baseline),
            None => None,
        };

        let (tension, transition) = self.evaluate(smoothed, baseline);
        if let Some(transition) = transition {
            if transition.credited {
                self.credited += 1;
            }
            debug!(
                "{}: {:?} {:?} at {:.3} (credited: {})",
                self.profile.exercise, transition.kind, transition.direction, smoothed, transition.credited
            );
        }
        FrameOutcome::Evaluated {
            signal: smoothed,
            tension,
            transition,
        }
    }

    fn evaluate(&mut self, signal: f64, baseline: Option<f64>) -> (Option<f64>, Option<Transition>) {
        match self.profile.thresholds {
            Thresholds::Bidirectional {
                center,
                engage_low,
                engage_high,
                reset_low,
                reset_high,
            } => {
                // Uncalibrated bounds are compared as given, never recomputed
                let shift = |bound: f64| baseline.map_or(bound, |b| bound + (b - center));
                let transition = match self.state {
                    DetectorState::Neutral => {
                        let side = if signal > shift(engage_high) {
                            Some(Direction::Right)
                        } else if signal < shift(engage_low) {
                            Some(Direction::Left)
                        } else {
                            None
                        };
                        side.filter(|side| self.last_direction != Some(*side))
                            .map(|side| self.engage(Some(side), signal))
                    }
                    DetectorState::Engaged(side) => (signal > shift(reset_low) && signal < shift(reset_high))
                        .then(|| self.release(side, signal)),
                };
                (None, transition)
            }
            Thresholds::BaselineRatio {
                engage_ratio,
                release_ratio,
            } => {
                // Validation guarantees a calibrator, so a baseline exists here
                let Some(baseline) = baseline else {
                    return (None, None);
                };
                let engage_point = baseline * engage_ratio;
                let release_point = baseline * release_ratio;
                let tension = tension_level(signal, baseline, engage_point);
                let transition = match self.state {
                    DetectorState::Neutral => (signal < engage_point).then(|| self.engage(None, signal)),
                    DetectorState::Engaged(side) => (signal > release_point).then(|| self.release(side, signal)),
                };
                (Some(tension), transition)
            }
        }
    }

    fn engage(&mut self, direction: Option<Direction>, signal: f64) -> Transition {
        self.state = DetectorState::Engaged(direction);
        self.last_direction = direction;
        Transition {
            kind: TransitionKind::Engage,
            direction,
            credited: self.profile.credit == CreditPolicy::OnEngage,
            signal,
        }
    }

    fn release(&mut self, direction: Option<Direction>, signal: f64) -> Transition {
        self.state = DetectorState::Neutral;
        self.last_direction = None;
        Transition {
            kind: TransitionKind::Release,
            direction,
            credited: self.profile.credit == CreditPolicy::OnRelease,
            signal,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DetectorState {
        self.state
    }

    #[must_use]
    pub const fn profile(&self) -> &GestureProfile {
        &self.profile
    }

    /// Frozen baseline, if this detector calibrates and has finished
    #[must_use]
    pub fn baseline(&self) -> Option<f64> {
        self.calibrator.as_ref().and_then(BaselineCalibrator::baseline)
    }

    /// Repetitions credited so far by this detector
    #[must_use]
    pub const fn credited(&self) -> u32 {
        self.credited
    }
}

/// Linear map of the signal between baseline (0) and the engage point (100)
fn tension_level(signal: f64, baseline: f64, engage_point: f64) -> f64 {
    let span = baseline - engage_point;
    if span.abs() < crate::constants::EPSILON {
        return 0.0;
    }
    let level = (baseline - signal) / span * 100.0;
    if level.is_finite() {
        level.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
