/// Per-frame summary of what the detectors saw.
///
/// Both flags start false and are only ever raised, so a frame with no
/// visible face reads as "eyes not detected" and therefore drowsy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceObservation {
    pub faces: usize,
    pub eyes_detected: bool,
    pub yawning_detected: bool,
}

impl FaceObservation {
    /// The drowsiness signal: eyes not found, or a yawn found.
    pub fn is_drowsy(&self) -> bool {
        !self.eyes_detected || self.yawning_detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::alert(true, false, false)]
    #[case::eyes_closed(false, false, true)]
    #[case::yawning_with_eyes_open(true, true, true)]
    #[case::eyes_closed_and_yawning(false, true, true)]
    fn test_is_drowsy_truth_table(
        #[case] eyes_detected: bool,
        #[case] yawning_detected: bool,
        #[case] drowsy: bool,
    ) {
        let obs = FaceObservation {
            faces: 1,
            eyes_detected,
            yawning_detected,
        };
        assert_eq!(obs.is_drowsy(), drowsy);
    }

    #[test]
    fn test_default_observation_is_drowsy() {
        let obs = FaceObservation::default();
        assert_eq!(obs.faces, 0);
        assert!(obs.is_drowsy());
    }
}
