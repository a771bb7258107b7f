//! Helper functions and utilities for tests
#![allow(dead_code)]

use motion_coach::{
    constants::{
        FACE_LEFT_BROW_INNER, FACE_LEFT_EYE, FACE_LOWER_LIP, FACE_MOUTH_LEFT, FACE_MOUTH_RIGHT, FACE_NOSE_TIP,
        FACE_RIGHT_BROW_INNER, FACE_RIGHT_EYE, POSE_LEFT_EAR, POSE_LEFT_SHOULDER, POSE_NOSE, POSE_RIGHT_EAR,
        POSE_RIGHT_SHOULDER,
    },
    landmarks::{Landmark, LandmarkFrame, LandmarkSet},
};

/// Frame spacing of a ~30 fps camera
pub const FRAME_MS: u64 = 33;

/// Pose frame whose ear line sits at `degrees` (positive = right ear lower)
pub fn tilt_frame(timestamp_ms: u64, degrees: f64) -> LandmarkFrame {
    let radians = degrees.to_radians();
    let left = Landmark::new(0.4, 0.5);
    let right = Landmark::new(0.4 + 0.2 * radians.cos(), 0.5 + 0.2 * radians.sin());
    LandmarkFrame::new(timestamp_ms).with_pose(
        LandmarkSet::new()
            .set(POSE_NOSE, Landmark::new(0.5, 0.45))
            .set(POSE_LEFT_EAR, left)
            .set(POSE_RIGHT_EAR, right)
            .build(),
    )
}

/// Pose frame whose nose sits at `ratio` of the ear span (0.5 = centered)
pub fn rotation_frame(timestamp_ms: u64, ratio: f64) -> LandmarkFrame {
    LandmarkFrame::new(timestamp_ms).with_pose(
        LandmarkSet::new()
            .set(POSE_NOSE, Landmark::new(0.4 + 0.2 * ratio, 0.45))
            .set(POSE_LEFT_EAR, Landmark::new(0.4, 0.5))
            .set(POSE_RIGHT_EAR, Landmark::new(0.6, 0.5))
            .build(),
    )
}

/// Pose frame whose nose-to-shoulder height is `ratio` times the shoulder width
pub fn shrug_frame(timestamp_ms: u64, ratio: f64) -> LandmarkFrame {
    LandmarkFrame::new(timestamp_ms).with_pose(
        LandmarkSet::new()
            .set(POSE_NOSE, Landmark::new(0.5, 0.7 - 0.4 * ratio))
            .set(POSE_LEFT_SHOULDER, Landmark::new(0.3, 0.7))
            .set(POSE_RIGHT_SHOULDER, Landmark::new(0.7, 0.7))
            .build(),
    )
}

/// Face mesh frame with both eyes at aspect ratio `ear` and a neutral expression
pub fn face_frame(timestamp_ms: u64, ear: f64) -> LandmarkFrame {
    expression_frame(timestamp_ms, ear, 0.2, 0.0)
}

/// Face mesh frame with a chosen brow-to-nose distance and lip curvature
pub fn expression_frame(timestamp_ms: u64, ear: f64, brow_distance: f64, lip_curvature: f64) -> LandmarkFrame {
    let [l_top, l_bottom, l_outer, l_inner] = FACE_LEFT_EYE;
    let [r_top, r_bottom, r_outer, r_inner] = FACE_RIGHT_EYE;
    let nose_y = 0.55;
    let brow_y = nose_y - brow_distance / 2.0;
    LandmarkFrame::new(timestamp_ms).with_face(
        LandmarkSet::new()
            .set(l_top, Landmark::new(0.35, 0.40))
            .set(l_bottom, Landmark::new(0.35, 0.40 + ear * 0.1))
            .set(l_outer, Landmark::new(0.30, 0.42))
            .set(l_inner, Landmark::new(0.40, 0.42))
            .set(r_top, Landmark::new(0.65, 0.40))
            .set(r_bottom, Landmark::new(0.65, 0.40 + ear * 0.1))
            .set(r_outer, Landmark::new(0.70, 0.42))
            .set(r_inner, Landmark::new(0.60, 0.42))
            .set(FACE_NOSE_TIP, Landmark::new(0.5, nose_y))
            .set(FACE_LEFT_BROW_INNER, Landmark::new(0.45, brow_y))
            .set(FACE_RIGHT_BROW_INNER, Landmark::new(0.55, brow_y))
            .set(FACE_LOWER_LIP, Landmark::new(0.5, 0.7 + lip_curvature))
            .set(FACE_MOUTH_LEFT, Landmark::new(0.45, 0.7))
            .set(FACE_MOUTH_RIGHT, Landmark::new(0.55, 0.7))
            .build(),
    )
}

/// `value` repeated `frames` times
pub fn hold(value: f64, frames: usize) -> Vec<f64> {
    vec![value; frames]
}

/// Rest, +amplitude, rest, -amplitude; repeated `cycles` times
pub fn oscillation(center: f64, amplitude: f64, frames_per_phase: usize, cycles: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(cycles * frames_per_phase * 4);
    for _ in 0..cycles {
        values.extend(hold(center, frames_per_phase));
        values.extend(hold(center + amplitude, frames_per_phase));
        values.extend(hold(center, frames_per_phase));
        values.extend(hold(center - amplitude, frames_per_phase));
    }
    values
}

/// Timestamped frames built from signal values, one every [`FRAME_MS`]
pub fn frames(start_ms: u64, values: &[f64], build: fn(u64, f64) -> LandmarkFrame) -> Vec<LandmarkFrame> {
    values
        .iter()
        .zip(0u64..)
        .map(|(value, i)| build(start_ms + i * FRAME_MS, *value))
        .collect()
}

/// Serialize frames as a JSON-lines trace
pub fn to_trace(frames: &[LandmarkFrame]) -> String {
    frames
        .iter()
        .map(|frame| serde_json::to_string(frame).unwrap() + "\n")
        .collect()
}
