//! Constants used throughout the library

/// Pose landmark indices (33-point body model)
pub const POSE_NOSE: usize = 0;
pub const POSE_LEFT_EAR: usize = 7;
pub const POSE_RIGHT_EAR: usize = 8;
pub const POSE_LEFT_SHOULDER: usize = 11;
pub const POSE_RIGHT_SHOULDER: usize = 12;

/// Face mesh indices for the left eye (top, bottom, outer, inner)
pub const FACE_LEFT_EYE: [usize; 4] = [159, 145, 33, 133];
/// Face mesh indices for the right eye (top, bottom, outer, inner)
pub const FACE_RIGHT_EYE: [usize; 4] = [386, 374, 263, 362];

/// Face mesh indices used for mood estimation
pub const FACE_NOSE_TIP: usize = 1;
pub const FACE_LEFT_BROW_INNER: usize = 55;
pub const FACE_RIGHT_BROW_INNER: usize = 285;
pub const FACE_LOWER_LIP: usize = 14;
pub const FACE_MOUTH_LEFT: usize = 61;
pub const FACE_MOUTH_RIGHT: usize = 291;

/// Smoothing window sizes per gesture
pub const TILT_WINDOW: usize = 8;
pub const ROTATION_WINDOW: usize = 6;
pub const SHRUG_WINDOW: usize = 5;

/// Neck tilt thresholds (degrees); engage outside, reset strictly inside
pub const TILT_CENTER: f64 = 0.0;
pub const TILT_ENGAGE_LOW: f64 = -16.0;
pub const TILT_ENGAGE_HIGH: f64 = 16.0;
pub const TILT_RESET_LOW: f64 = -10.0;
pub const TILT_RESET_HIGH: f64 = 10.0;

/// Head rotation thresholds (nose position within the ear span)
pub const ROTATION_CENTER: f64 = 0.5;
pub const ROTATION_ENGAGE_LOW: f64 = 0.35;
pub const ROTATION_ENGAGE_HIGH: f64 = 0.65;
pub const ROTATION_RESET_LOW: f64 = 0.42;
pub const ROTATION_RESET_HIGH: f64 = 0.58;

/// Shoulder shrug thresholds, as fractions of the calibrated baseline
pub const SHRUG_ENGAGE_RATIO: f64 = 0.80;
pub const SHRUG_RELEASE_RATIO: f64 = 0.95;

/// Frames spent establishing a personal baseline
pub const DEFAULT_CALIBRATION_FRAMES: usize = 30;

/// Rewards and goals
pub const TILT_REWARD: u32 = 10;
pub const ROTATION_REWARD: u32 = 15;
pub const SHRUG_REWARD: u32 = 15;
pub const TILT_GOAL: u32 = 10;
pub const ROTATION_GOAL: u32 = 10;
pub const SHRUG_GOAL: u32 = 20;

/// Minimum gap between two spoken prompts from one detector (ms)
pub const TILT_VOCAL_COOLDOWN_MS: u64 = 2_500;
pub const ROTATION_VOCAL_COOLDOWN_MS: u64 = 3_000;
pub const SHRUG_VOCAL_COOLDOWN_MS: u64 = 2_500;

/// Blink detection
pub const BLINK_EAR_THRESHOLD: f64 = 0.12;
pub const BLINK_REFRACTORY_MS: u64 = 300;
pub const BLINK_RATE_WINDOW_MS: u64 = 60_000;

/// Eye strain: fewer blinks than this in the rate window...
pub const STRAIN_MIN_BLINKS: usize = 8;
/// ...and no blink for longer than this
pub const STRAIN_STALE_MS: u64 = 8_000;

/// Frames between two monitoring updates
pub const MONITOR_REPORT_INTERVAL: usize = 30;

/// Mood thresholds
pub const STRESSED_BROW_DISTANCE: f64 = 0.042;
pub const HAPPY_LIP_CURVATURE: f64 = -0.012;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
