use crate::shared::frame::Frame;

/// Live preview surface plus the keyboard it owns.
///
/// `poll_key` blocks for at most a few milliseconds, which is also what
/// lets native windows repaint.
pub trait FrameDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns the key pressed since the last poll, if any.
    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>>;

    fn close(&mut self);
}

/// No window and no keyboard: frames are dropped and no key is ever seen.
pub struct HeadlessDisplay;

impl FrameDisplay for HeadlessDisplay {
    fn show(&mut self, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>> {
        Ok(None)
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_display_accepts_frames_and_reports_no_keys() {
        let mut display = HeadlessDisplay;
        let frame = Frame::new(vec![0; 12], 2, 2, 3, 0);
        display.show(&frame).unwrap();
        assert_eq!(display.poll_key().unwrap(), None);
        display.close();
    }
}
