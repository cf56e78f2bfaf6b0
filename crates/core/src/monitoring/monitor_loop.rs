use std::time::Instant;

use crate::alarm::domain::alarm::{Alarm, AlarmError};
use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::face_analyzer::FaceAnalyzer;
use crate::display::domain::frame_display::FrameDisplay;
use crate::monitoring::clock::Clock;
use crate::monitoring::debounce_timer::{AlarmAction, DebounceTimer};
use crate::monitoring::monitor_logger::MonitorLogger;
use crate::shared::cancellation::CancellationToken;
use crate::shared::frame::Frame;

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// Quit key pressed or cancellation requested.
    Cancelled,
    /// The source ran dry or a frame read failed.
    StreamEnded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorReport {
    pub frames: usize,
    pub alarms_raised: usize,
    pub exit: ExitReason,
}

/// Single-threaded drowsiness monitor:
/// capture → detect → debounce → alarm → display → check for quit.
///
/// Whatever way `run` ends (quit, end of stream, or an error from a
/// detector, alarm or window), the alarm is stopped, the camera released
/// and the window closed before it returns.
pub struct MonitorLoop {
    source: Box<dyn FrameSource>,
    analyzer: FaceAnalyzer,
    timer: DebounceTimer,
    alarm: Box<dyn Alarm>,
    display: Box<dyn FrameDisplay>,
    clock: Box<dyn Clock>,
    logger: Box<dyn MonitorLogger>,
    quit_key: char,
    cancel: CancellationToken,
}

impl MonitorLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        analyzer: FaceAnalyzer,
        timer: DebounceTimer,
        alarm: Box<dyn Alarm>,
        display: Box<dyn FrameDisplay>,
        clock: Box<dyn Clock>,
        logger: Box<dyn MonitorLogger>,
        quit_key: char,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            analyzer,
            timer,
            alarm,
            display,
            clock,
            logger,
            quit_key,
            cancel,
        }
    }

    pub fn run(mut self) -> Result<MonitorReport, Box<dyn std::error::Error>> {
        self.logger
            .info(&format!("Monitoring started. Press '{}' to quit.", self.quit_key));
        let result = self.run_inner();
        self.shutdown();
        result
    }

    fn run_inner(&mut self) -> Result<MonitorReport, Box<dyn std::error::Error>> {
        let mut report = MonitorReport {
            frames: 0,
            alarms_raised: 0,
            exit: ExitReason::StreamEnded,
        };

        loop {
            let t0 = Instant::now();
            let frame = match self.source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    self.logger.info("Camera stream ended");
                    break;
                }
                Err(e) => {
                    log::warn!("Frame read failed, stopping: {e}");
                    break;
                }
            };
            self.logger.timing("capture", elapsed_ms(t0));

            if self.process_frame(&frame)? == AlarmAction::Start {
                report.alarms_raised += 1;
            }
            report.frames += 1;

            let t1 = Instant::now();
            self.display.show(&frame)?;
            let key = self.display.poll_key()?;
            self.logger.timing("display", elapsed_ms(t1));

            if key == Some(self.quit_key) {
                self.logger.info("Quit key pressed");
                report.exit = ExitReason::Cancelled;
                break;
            }
            if self.cancel.is_cancelled() {
                self.logger.info("Cancellation requested");
                report.exit = ExitReason::Cancelled;
                break;
            }
        }

        Ok(report)
    }

    /// Detect, update the debounce timer and drive the alarm for one frame.
    fn process_frame(
        &mut self,
        frame: &Frame,
    ) -> Result<AlarmAction, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let gray = frame.to_grayscale();
        let observation = self.analyzer.analyze(&gray)?;
        self.logger.timing("detect", elapsed_ms(t0));
        self.logger.metric("faces", observation.faces as f64);
        self.logger.frame_status(frame.index(), &observation);

        let now = self.clock.now();
        let was_idle = self.timer.start_time().is_none();
        let action = self.timer.update(observation.is_drowsy(), now);
        if was_idle && self.timer.start_time().is_some() {
            log::debug!("Drowsiness detected at frame {}, timer armed", frame.index());
        }
        self.drive_alarm(action)?;
        Ok(action)
    }

    fn drive_alarm(&mut self, action: AlarmAction) -> Result<(), AlarmError> {
        match action {
            AlarmAction::None => {}
            AlarmAction::Start => {
                self.logger.info(&format!(
                    "Drowsiness held for {:.2}s, alarm on",
                    self.timer.threshold().as_secs_f64()
                ));
                self.alarm.play()?;
            }
            AlarmAction::Stop => {
                self.logger.info("Driver alert again, alarm off");
                self.alarm.stop();
            }
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.alarm.stop();
        self.source.release();
        self.display.close();
        self.logger.info("Monitoring stopped");
        self.logger.summary();
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
