use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera {index} could not be opened")]
    DeviceOpen { index: i32 },
    #[error("frame read failed: {0}")]
    FrameRead(String),
    #[error("camera backend error: {0}")]
    Backend(String),
}

/// A live source of camera frames.
///
/// The source holds the capture device exclusively from construction until
/// `release` (or drop). Reads may block until the device delivers a frame.
pub trait FrameSource {
    /// Returns the next frame, or `Ok(None)` once the stream has ended.
    fn read(&mut self) -> Result<Option<Frame>, CaptureError>;

    /// Gives the device back to the OS. Calling it twice is harmless.
    fn release(&mut self);
}
