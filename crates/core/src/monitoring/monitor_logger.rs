use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use crate::detection::domain::face_observation::FaceObservation;

/// Cross-cutting observer for monitoring loop events.
///
/// Decouples the loop from specific output mechanisms (console, log crate,
/// tests) so each caller can watch the loop without changing it.
pub trait MonitorLogger {
    /// Report what the detectors saw in one frame.
    fn frame_status(&mut self, frame_index: usize, observation: &FaceObservation);

    /// Record how long a named loop stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullMonitorLogger;

impl MonitorLogger for NullMonitorLogger {
    fn frame_status(&mut self, _frame_index: usize, _observation: &FaceObservation) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count and sum of one timing stage or metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RunningStat {
    count: usize,
    total: f64,
}

impl RunningStat {
    fn record(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Console logger: prints one `Eyes: .., Yawning: ..` line per frame to
/// stdout and aggregates per-stage timings for a summary at shutdown.
///
/// Only running totals are kept, so memory stays flat however long the
/// monitor runs.
pub struct StdoutMonitorLogger {
    timings: HashMap<String, RunningStat>,
    metrics: HashMap<String, RunningStat>,
    start_time: Instant,
    frames: usize,
}

impl StdoutMonitorLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// The per-frame console line.
    pub fn status_line(observation: &FaceObservation) -> String {
        format!(
            "Eyes: {}, Yawning: {}",
            observation.eyes_detected, observation.yawning_detected
        )
    }

    /// Returns the formatted summary string, or `None` if no frame was seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames;
        let mut lines = Vec::new();

        lines.push(format!(
            "Monitoring summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stat = self.timings[stage];
            let (avg_ms, total_ms) = (stat.average(), stat.total);
            lines.push(format!("  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let stat = self.metrics[name];
            let (avg, total) = (stat.average(), stat.total);
            lines.push(format!("  {name}: avg {avg:.1}  total {total:.0}"));
        }

        if elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutMonitorLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorLogger for StdoutMonitorLogger {
    fn frame_status(&mut self, frame_index: usize, observation: &FaceObservation) {
        self.frames += 1;
        log::trace!("frame {frame_index}: {observation:?}");
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", Self::status_line(observation));
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
