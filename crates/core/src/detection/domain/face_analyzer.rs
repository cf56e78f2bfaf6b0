use crate::detection::domain::face_observation::FaceObservation;
use crate::detection::domain::region_detector::TunedDetector;
use crate::shared::gray_image::GrayImage;
use crate::shared::region::Region;

/// Runs the face → eyes/mouth detector cascade over one grayscale frame.
///
/// Faces are searched over the whole frame; eyes and mouths only inside
/// each face's bounding box. With several faces the flags accumulate: a
/// single face with visible eyes is enough to set `eyes_detected`, and a
/// single yawning face sets `yawning_detected`.
pub struct FaceAnalyzer {
    face: TunedDetector,
    eye: TunedDetector,
    mouth: TunedDetector,
    yawn_ratio: f64,
}

impl FaceAnalyzer {
    pub fn new(
        face: TunedDetector,
        eye: TunedDetector,
        mouth: TunedDetector,
        yawn_ratio: f64,
    ) -> Self {
        Self {
            face,
            eye,
            mouth,
            yawn_ratio,
        }
    }

    pub fn analyze(
        &mut self,
        gray: &GrayImage,
    ) -> Result<FaceObservation, Box<dyn std::error::Error>> {
        let faces = self.face.detect(gray)?;
        let mut observation = FaceObservation {
            faces: faces.len(),
            ..FaceObservation::default()
        };

        for face in &faces {
            let roi = gray.crop(face);
            if roi.is_empty() {
                log::debug!("Skipping face {face:?} outside frame bounds");
                continue;
            }

            let eyes = self.eye.detect(&roi)?;
            observation.eyes_detected |= !eyes.is_empty();

            let mouths = self.mouth.detect(&roi)?;
            observation.yawning_detected |= mouths.iter().any(|m| self.is_yawn(m));
        }

        Ok(observation)
    }

    /// A mouth region counts as a yawn when it is wide relative to its height.
    pub fn is_yawn(&self, mouth: &Region) -> bool {
        mouth.aspect_ratio() > self.yawn_ratio
    }
}
