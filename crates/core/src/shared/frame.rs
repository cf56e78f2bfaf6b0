use ndarray::ArrayView3;

use crate::shared::gray_image::GrayImage;

/// A single captured camera frame: contiguous RGB bytes in row-major order.
///
/// Frames are ephemeral: each one is owned by the loop iteration that read
/// it and dropped once the iteration finishes. Format conversion (BGR from
/// the camera, BGR back to the window) happens at I/O boundaries only.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Builds an RGB frame from packed BGR bytes, the layout cameras deliver.
    pub fn from_bgr(bgr: &[u8], width: u32, height: u32, index: usize) -> Self {
        Self::new(swap_red_blue(bgr), width, height, 3, index)
    }

    /// Packed BGR copy of an RGB frame, for handing back to native windows.
    pub fn to_bgr(&self) -> Vec<u8> {
        swap_red_blue(&self.data)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Zero-based position of this frame in the capture stream.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Converts to 8-bit luminance.
    ///
    /// Uses the fixed-point BT.601 weights OpenCV applies for
    /// `COLOR_RGB2GRAY`, so cascades see the same intensities they were
    /// trained on. A fourth (alpha) channel is ignored.
    pub fn to_grayscale(&self) -> GrayImage {
        let pixels = match self.channels {
            1 => self.data.clone(),
            _ => {
                let arr = self.as_ndarray();
                let mut out = Vec::with_capacity((self.width * self.height) as usize);
                for row in arr.outer_iter() {
                    for px in row.outer_iter() {
                        out.push(luma(px[0], px[1], px[2]));
                    }
                }
                out
            }
        };
        GrayImage::new(pixels, self.width, self.height)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

fn swap_red_blue(pixels: &[u8]) -> Vec<u8> {
    let mut out = pixels.to_vec();
    for px in out.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    out
}

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}
