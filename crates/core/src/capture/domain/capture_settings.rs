use crate::shared::constants::{
    DEFAULT_CAMERA_INDEX, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_RATE, DEFAULT_FRAME_WIDTH,
};

/// Requested capture format. Devices treat these as hints and may
/// deliver something else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureSettings {
    pub device_index: i32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            device_index: DEFAULT_CAMERA_INDEX,
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            fps: DEFAULT_FRAME_RATE,
        }
    }
}
