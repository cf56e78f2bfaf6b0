pub mod detection_params;
pub mod face_analyzer;
pub mod face_observation;
pub mod region_detector;
