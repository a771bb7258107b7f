//! Landmark frames delivered by an external pose / face-mesh detector.
//!
//! Coordinates are normalized to the image (0-1), with `y` growing downward.
//! A frame may carry a pose skeleton, a face mesh, both, or neither.

use serde::{Deserialize, Serialize};

/// A single named keypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "full_visibility")]
    pub visibility: f64,
}

const fn full_visibility() -> f64 {
    1.0
}

impl Landmark {
    /// Landmark with full visibility and zero depth
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// Set visibility
    #[must_use]
    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = visibility;
        self
    }

    fn is_usable(&self, min_visibility: f64) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.visibility >= min_visibility
    }
}

/// Timestamped detector output for one camera frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Capture time in milliseconds
    pub timestamp_ms: u64,

    /// Body landmarks, indexed by the pose model's numbering
    #[serde(default)]
    pub pose: Option<Vec<Option<Landmark>>>,

    /// Face mesh landmarks, indexed by the face model's numbering
    #[serde(default)]
    pub face: Option<Vec<Option<Landmark>>>,
}

impl LandmarkFrame {
    /// Empty frame (no detections)
    #[must_use]
    pub const fn new(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            pose: None,
            face: None,
        }
    }

    /// Attach a pose skeleton
    #[must_use]
    pub fn with_pose(mut self, points: Vec<Option<Landmark>>) -> Self {
        self.pose = Some(points);
        self
    }

    /// Attach a face mesh
    #[must_use]
    pub fn with_face(mut self, points: Vec<Option<Landmark>>) -> Self {
        self.face = Some(points);
        self
    }

    /// Look up a pose landmark, or `None` if absent, non-finite or not visible enough
    #[must_use]
    pub fn pose_point(&self, index: usize, min_visibility: f64) -> Option<Landmark> {
        lookup(self.pose.as_deref(), index, min_visibility)
    }

    /// Look up a face mesh landmark with the same rules as [`Self::pose_point`]
    #[must_use]
    pub fn face_point(&self, index: usize, min_visibility: f64) -> Option<Landmark> {
        lookup(self.face.as_deref(), index, min_visibility)
    }
}

fn lookup(points: Option<&[Option<Landmark>]>, index: usize, min_visibility: f64) -> Option<Landmark> {
    points?
        .get(index)
        .copied()
        .flatten()
        .filter(|p| p.is_usable(min_visibility))
}

/// Sparse builder for landmark lists, used when only a handful of indices matter
#[derive(Debug, Default)]
pub struct LandmarkSet {
    points: Vec<Option<Landmark>>,
}

impl LandmarkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a landmark at `index`, growing the list as needed
    #[must_use]
    pub fn set(mut self, index: usize, point: Landmark) -> Self {
        if self.points.len() <= index {
            self.points.resize(index + 1, None);
        }
        self.points[index] = Some(point);
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<Option<Landmark>> {
        self.points
    }
}
