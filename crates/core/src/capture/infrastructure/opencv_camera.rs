use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::capture_settings::CaptureSettings;
use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::shared::frame::Frame;

/// Webcam capture through OpenCV's `VideoCapture`.
///
/// Frames arrive as BGR and are converted to RGB [`Frame`]s here.
/// The device is released on [`FrameSource::release`] or on drop,
/// whichever comes first.
pub struct OpenCvCamera {
    capture: VideoCapture,
    device_index: i32,
    next_index: usize,
    released: bool,
}

impl OpenCvCamera {
    pub fn open(settings: &CaptureSettings) -> Result<Self, CaptureError> {
        let index = settings.device_index;
        log::info!("Opening camera {index}");
        let mut capture = VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        let opened = capture
            .is_opened()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        if !opened {
            return Err(CaptureError::DeviceOpen { index });
        }

        let requests = [
            ("width", videoio::CAP_PROP_FRAME_WIDTH, settings.width),
            ("height", videoio::CAP_PROP_FRAME_HEIGHT, settings.height),
            ("fps", videoio::CAP_PROP_FPS, settings.fps),
        ];
        for (name, prop, value) in requests {
            match capture.set(prop, f64::from(value)) {
                Ok(true) => log::debug!("Camera {name} set to {value}"),
                Ok(false) => log::debug!("Camera ignored {name}={value}"),
                Err(e) => log::warn!("Failed to set camera {name}={value}: {e}"),
            }
        }

        Ok(Self {
            capture,
            device_index: index,
            next_index: 0,
            released: false,
        })
    }

    fn mat_to_frame(&self, mat: &Mat) -> Result<Frame, CaptureError> {
        if mat.typ() != CV_8UC3 {
            return Err(CaptureError::FrameRead(format!(
                "unexpected pixel type {}",
                mat.typ()
            )));
        }
        let owned;
        let continuous = if mat.is_continuous() {
            mat
        } else {
            owned = mat
                .try_clone()
                .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
            &owned
        };
        let bytes = continuous
            .data_bytes()
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
        Ok(Frame::from_bgr(
            bytes,
            mat.cols() as u32,
            mat.rows() as u32,
            self.next_index,
        ))
    }
}

impl FrameSource for OpenCvCamera {
    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        if self.released {
            return Ok(None);
        }
        let mut mat = Mat::default();
        let ok = self
            .capture
            .read(&mut mat)
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
        if !ok || mat.rows() <= 0 || mat.cols() <= 0 {
            return Ok(None);
        }
        let frame = self.mat_to_frame(&mat)?;
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.capture.release() {
            Ok(()) => log::info!("Released camera {}", self.device_index),
            Err(e) => log::warn!("Failed to release camera {}: {e}", self.device_index),
        }
    }
}

impl Drop for OpenCvCamera {
    fn drop(&mut self) {
        self.release();
    }
}
