use std::path::PathBuf;

use thiserror::Error;

use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::gray_image::GrayImage;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("failed to load detector model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
}

/// Domain interface for "find regions of interest in a grayscale image".
///
/// Face, eye and mouth detection are all instances of this one capability,
/// told apart only by the model behind them and the [`DetectionParams`]
/// they are run with. Returned regions are in `image` coordinates.
pub trait RegionDetector: Send {
    fn detect(
        &mut self,
        image: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

/// A detector bundled with the tuning it is always run with.
pub struct TunedDetector {
    detector: Box<dyn RegionDetector>,
    params: DetectionParams,
}

impl TunedDetector {
    pub fn new(detector: Box<dyn RegionDetector>, params: DetectionParams) -> Self {
        Self { detector, params }
    }

    pub fn detect(&mut self, image: &GrayImage) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        self.detector.detect(image, &self.params)
    }
}
