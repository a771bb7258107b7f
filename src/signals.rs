//! Scalar signals derived from landmark frames.
//!
//! Every function returns `None` when a required landmark is missing or the
//! geometry degenerates (zero span), so callers can skip the frame without
//! ever feeding NaN or infinity into a smoothing window.

use crate::{
    constants::{
        FACE_LEFT_BROW_INNER, FACE_LEFT_EYE, FACE_LOWER_LIP, FACE_MOUTH_LEFT, FACE_MOUTH_RIGHT, FACE_NOSE_TIP,
        FACE_RIGHT_BROW_INNER, FACE_RIGHT_EYE, POSE_LEFT_EAR, POSE_LEFT_SHOULDER, POSE_NOSE, POSE_RIGHT_EAR,
        POSE_RIGHT_SHOULDER,
    },
    landmarks::LandmarkFrame,
};

/// Which scalar a gesture detector tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Angle of the ear-to-ear line in degrees (0 = level)
    EarTilt,
    /// Nose position within the ear span (0.5 = facing camera)
    NoseRotation,
    /// Nose-to-shoulder height over shoulder width
    ShoulderElevation,
    /// Mean eye aspect ratio across both eyes
    EyeAspectRatio,
}

impl SignalKind {
    /// Derive this signal from a frame
    #[must_use]
    pub fn extract(self, frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
        match self {
            Self::EarTilt => ear_tilt_degrees(frame, min_visibility),
            Self::NoseRotation => nose_rotation_ratio(frame, min_visibility),
            Self::ShoulderElevation => shoulder_elevation_ratio(frame, min_visibility),
            Self::EyeAspectRatio => eye_aspect_ratio(frame, min_visibility),
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Ear-line angle: `atan2(right.y - left.y, right.x - left.x)` in degrees
#[must_use]
pub fn ear_tilt_degrees(frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
    let left = frame.pose_point(POSE_LEFT_EAR, min_visibility)?;
    let right = frame.pose_point(POSE_RIGHT_EAR, min_visibility)?;
    let (dx, dy) = (right.x - left.x, right.y - left.y);
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    finite(dy.atan2(dx).to_degrees())
}

/// `(nose.x - leftEar.x) / (rightEar.x - leftEar.x)`
#[must_use]
pub fn nose_rotation_ratio(frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
    let nose = frame.pose_point(POSE_NOSE, min_visibility)?;
    let left = frame.pose_point(POSE_LEFT_EAR, min_visibility)?;
    let right = frame.pose_point(POSE_RIGHT_EAR, min_visibility)?;
    finite((nose.x - left.x) / (right.x - left.x))
}

/// `(mean shoulder y - nose.y) / |right shoulder x - left shoulder x|`
///
/// Shrinks as the shoulders rise toward the ears.
#[must_use]
pub fn shoulder_elevation_ratio(frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
    let nose = frame.pose_point(POSE_NOSE, min_visibility)?;
    let left = frame.pose_point(POSE_LEFT_SHOULDER, min_visibility)?;
    let right = frame.pose_point(POSE_RIGHT_SHOULDER, min_visibility)?;
    let shoulder_y = (left.y + right.y) / 2.0;
    finite((shoulder_y - nose.y) / (right.x - left.x).abs())
}

fn single_eye_ratio(frame: &LandmarkFrame, [top, bottom, outer, inner]: [usize; 4], min_visibility: f64) -> Option<f64> {
    let top = frame.face_point(top, min_visibility)?;
    let bottom = frame.face_point(bottom, min_visibility)?;
    let outer = frame.face_point(outer, min_visibility)?;
    let inner = frame.face_point(inner, min_visibility)?;
    finite((top.y - bottom.y).abs() / (outer.x - inner.x).abs())
}

/// Eyelid gap over eye width, averaged across both eyes
#[must_use]
pub fn eye_aspect_ratio(frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
    let left = single_eye_ratio(frame, FACE_LEFT_EYE, min_visibility)?;
    let right = single_eye_ratio(frame, FACE_RIGHT_EYE, min_visibility)?;
    Some((left + right) / 2.0)
}

/// Vertical distance of both inner brows from the nose tip
#[must_use]
pub fn brow_nose_distance(frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
    let nose = frame.face_point(FACE_NOSE_TIP, min_visibility)?;
    let left = frame.face_point(FACE_LEFT_BROW_INNER, min_visibility)?;
    let right = frame.face_point(FACE_RIGHT_BROW_INNER, min_visibility)?;
    Some((left.y - nose.y).abs() + (right.y - nose.y).abs())
}

/// Lower lip `y` minus the mean `y` of the mouth corners
#[must_use]
pub fn lip_curvature(frame: &LandmarkFrame, min_visibility: f64) -> Option<f64> {
    let lip = frame.face_point(FACE_LOWER_LIP, min_visibility)?;
    let left = frame.face_point(FACE_MOUTH_LEFT, min_visibility)?;
    let right = frame.face_point(FACE_MOUTH_RIGHT, min_visibility)?;
    Some(lip.y - (left.y + right.y) / 2.0)
}
