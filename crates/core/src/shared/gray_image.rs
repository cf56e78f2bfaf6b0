use ndarray::{s, ArrayView2};

use crate::shared::region::Region;

/// Single-channel 8-bit image, the input every region detector works on.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
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

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("GrayImage data length must match dimensions")
    }

    /// Copies out the sub-image covered by `region`.
    ///
    /// The region is clamped to the image bounds first; a region lying
    /// entirely outside yields an empty image.
    pub fn crop(&self, region: &Region) -> GrayImage {
        let r = region.clamp_to(self.width, self.height);
        if r.width <= 0 || r.height <= 0 {
            return GrayImage::new(Vec::new(), 0, 0);
        }
        let (x0, y0) = (r.x as usize, r.y as usize);
        let (x1, y1) = (x0 + r.width as usize, y0 + r.height as usize);
        let data: Vec<u8> = self
            .as_ndarray()
            .slice(s![y0..y1, x0..x1])
            .iter()
            .copied()
            .collect();
        GrayImage::new(data, r.width as u32, r.height as u32)
    }
}
