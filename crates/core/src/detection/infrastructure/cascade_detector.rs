use std::path::Path;

use opencv::core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::region_detector::{DetectionError, RegionDetector};
use crate::shared::gray_image::GrayImage;
use crate::shared::region::Region;

/// Haar/LBP cascade detector backed by OpenCV's `CascadeClassifier`.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
}

impl CascadeDetector {
    /// Loads a cascade XML file.
    ///
    /// OpenCV does not fail on an unreadable file, it yields an empty
    /// classifier; that case is reported as [`DetectionError::ModelLoad`].
    pub fn load(path: &Path) -> Result<Self, DetectionError> {
        let load_err = |reason: String| DetectionError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };
        let path_str = path
            .to_str()
            .ok_or_else(|| load_err("path is not valid UTF-8".to_string()))?;
        let classifier =
            CascadeClassifier::new(path_str).map_err(|e| load_err(e.to_string()))?;
        if classifier.empty().map_err(|e| load_err(e.to_string()))? {
            return Err(load_err("cascade is empty or unreadable".to_string()));
        }
        log::info!("Loaded cascade {}", path.display());
        Ok(Self { classifier })
    }
}

impl RegionDetector for CascadeDetector {
    fn detect(
        &mut self,
        image: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        if image.is_empty() {
            return Ok(Vec::new());
        }
        let mat = to_mat(image)?;

        let (min_w, min_h) = params.min_size.unwrap_or((0, 0));
        let mut objects: Vector<Rect> = Vector::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut objects,
            params.scale_factor,
            params.min_neighbors,
            0,
            Size::new(min_w, min_h),
            Size::default(),
        )?;

        Ok(objects
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

fn to_mat(image: &GrayImage) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        image.height() as i32,
        image.width() as i32,
        CV_8UC1,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(image.data());
    Ok(mat)
}
