//! Personal baseline calibration.
//!
//! Camera distance and angle differ per user and per session, so thresholds
//! for some gestures are expressed relative to a neutral value measured over
//! the first frames of the session.

/// Outcome of one calibration observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    /// Still collecting; `observed` of `required` frames seen so far
    Calibrating { observed: usize, required: usize },
    /// Baseline frozen
    Ready(f64),
}

impl CalibrationStatus {
    #[must_use]
    pub const fn is_calibrating(&self) -> bool {
        matches!(self, Self::Calibrating { .. })
    }

    #[must_use]
    pub const fn baseline(&self) -> Option<f64> {
        match self {
            Self::Ready(baseline) => Some(*baseline),
            Self::Calibrating { .. } => None,
        }
    }
}

/// Running-mean baseline that freezes after a fixed number of frames
#[derive(Debug, Clone)]
pub struct BaselineCalibrator {
    required: usize,
    observed: usize,
    mean: f64,
}

impl BaselineCalibrator {
    /// Create a calibrator that freezes on the `required`-th observation
    #[must_use]
    pub fn new(required: usize) -> Self {
        Self {
            required: required.max(1),
            observed: 0,
            mean: 0.0,
        }
    }

    /// Feed one (already smoothed) value
    ///
    /// The `required`-th call is folded into the mean and already reports
    /// [`CalibrationStatus::Ready`]. Later calls leave the baseline untouched.
    #[allow(clippy::cast_precision_loss)] // frame counts are small
    pub fn observe(&mut self, value: f64) -> CalibrationStatus {
        if self.observed < self.required {
            self.observed += 1;
            self.mean += (value - self.mean) / self.observed as f64;
        }
        self.status()
    }

    /// Current status without observing anything
    #[must_use]
    pub const fn status(&self) -> CalibrationStatus {
        if self.observed >= self.required {
            CalibrationStatus::Ready(self.mean)
        } else {
            CalibrationStatus::Calibrating {
                observed: self.observed,
                required: self.required,
            }
        }
    }

    /// Frozen baseline, if calibration has finished
    #[must_use]
    pub const fn baseline(&self) -> Option<f64> {
        self.status().baseline()
    }

    /// Fraction of calibration completed, 0.0 to 1.0
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        self.observed as f64 / self.required as f64
    }
}
