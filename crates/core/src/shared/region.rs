/// A detection rectangle in pixel coordinates of the image it was found in.
///
/// Regions are only meaningful within the iteration that produced them;
/// no identity is carried across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width divided by height; `0.0` for a degenerate region.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height <= 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    /// Intersects the region with a `bound_w` x `bound_h` image.
    ///
    /// Width and height are floored at zero, so a region that misses the
    /// image entirely comes back empty rather than negative.
    pub fn clamp_to(&self, bound_w: u32, bound_h: u32) -> Region {
        let (bw, bh) = (bound_w as i32, bound_h as i32);
        let x1 = self.x.clamp(0, bw);
        let y1 = self.y.clamp(0, bh);
        let x2 = (self.x + self.width).clamp(0, bw);
        let y2 = (self.y + self.height).clamp(0, bh);
        Region {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    // ── Aspect ratio ─────────────────────────────────────────────────

    #[rstest]
    #[case::wide_mouth(Region::new(0, 0, 40, 15), 40.0 / 15.0)]
    #[case::square(Region::new(5, 5, 30, 30), 1.0)]
    #[case::tall(Region::new(0, 0, 10, 20), 0.5)]
    #[case::zero_height(Region::new(0, 0, 10, 0), 0.0)]
    fn test_aspect_ratio(#[case] r: Region, #[case] expected: f64) {
        assert_relative_eq!(r.aspect_ratio(), expected);
    }

    // ── Clamping ─────────────────────────────────────────────────────

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let r = Region::new(10, 20, 30, 40);
        assert_eq!(r.clamp_to(640, 480), r);
    }

    #[test]
    fn test_clamp_crosses_right_and_bottom() {
        let r = Region::new(600, 450, 100, 100);
        assert_eq!(r.clamp_to(640, 480), Region::new(600, 450, 40, 30));
    }

    #[test]
    fn test_clamp_crosses_left_and_top() {
        let r = Region::new(-20, -10, 50, 40);
        assert_eq!(r.clamp_to(640, 480), Region::new(0, 0, 30, 30));
    }

    #[test]
    fn test_clamp_outside_is_empty() {
        let r = Region::new(700, 10, 50, 50).clamp_to(640, 480);
        assert_eq!((r.width, r.height), (0, 50));
    }
}
