use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    EYE_MIN_NEIGHBORS, EYE_MIN_SIZE, EYE_SCALE_FACTOR, FACE_MIN_NEIGHBORS, FACE_SCALE_FACTOR,
    MOUTH_MIN_NEIGHBORS, MOUTH_SCALE_FACTOR,
};

/// Multi-scale sliding-window tuning for a cascade detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Image shrink step between pyramid levels; must exceed 1.0.
    pub scale_factor: f64,
    /// Overlapping hits a candidate needs before it is reported.
    pub min_neighbors: i32,
    /// Smallest reported `(width, height)`; `None` lets the model decide.
    pub min_size: Option<(i32, i32)>,
}

impl DetectionParams {
    pub fn new(scale_factor: f64, min_neighbors: i32, min_size: Option<(i32, i32)>) -> Self {
        Self {
            scale_factor,
            min_neighbors,
            min_size,
        }
    }

    pub fn face() -> Self {
        Self::new(FACE_SCALE_FACTOR, FACE_MIN_NEIGHBORS, None)
    }

    pub fn eye() -> Self {
        Self::new(EYE_SCALE_FACTOR, EYE_MIN_NEIGHBORS, Some(EYE_MIN_SIZE))
    }

    pub fn mouth() -> Self {
        Self::new(MOUTH_SCALE_FACTOR, MOUTH_MIN_NEIGHBORS, None)
    }
}
