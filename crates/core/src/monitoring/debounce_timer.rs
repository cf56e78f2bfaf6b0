use std::time::{Duration, Instant};

/// Where the current drowsy span stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrowsyState {
    /// No drowsy span running.
    Idle,
    /// Drowsy since `since`, not yet for long enough to alarm.
    Armed { since: Instant },
    /// Drowsy since `since` for at least the threshold; alarm asserted.
    Alarmed { since: Instant },
}

/// What the alarm driver should do after a timer update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlarmAction {
    None,
    Start,
    Stop,
}

/// Debounces the per-frame drowsiness signal.
///
/// The alarm is asserted only once the signal has stayed true continuously
/// for `threshold`. Any false frame ends the span; the next true frame
/// starts a fresh one from zero.
#[derive(Clone, Debug)]
pub struct DebounceTimer {
    threshold: Duration,
    state: DrowsyState,
}

impl DebounceTimer {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            state: DrowsyState::Idle,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn state(&self) -> DrowsyState {
        self.state
    }

    /// Start of the running drowsy span, if any.
    pub fn start_time(&self) -> Option<Instant> {
        match self.state {
            DrowsyState::Idle => None,
            DrowsyState::Armed { since } | DrowsyState::Alarmed { since } => Some(since),
        }
    }

    pub fn alarm_triggered(&self) -> bool {
        matches!(self.state, DrowsyState::Alarmed { .. })
    }

    /// Feeds one frame's signal observed at `now`.
    ///
    /// The first drowsy frame only arms the timer; the threshold is checked
    /// from the following frame on.
    pub fn update(&mut self, drowsy: bool, now: Instant) -> AlarmAction {
        let (next, action) = match (self.state, drowsy) {
            (DrowsyState::Idle, false) => (DrowsyState::Idle, AlarmAction::None),
            (DrowsyState::Idle, true) => (DrowsyState::Armed { since: now }, AlarmAction::None),
            (DrowsyState::Armed { since }, true) => {
                if now.saturating_duration_since(since) >= self.threshold {
                    (DrowsyState::Alarmed { since }, AlarmAction::Start)
                } else {
                    (DrowsyState::Armed { since }, AlarmAction::None)
                }
            }
            (DrowsyState::Armed { .. }, false) => (DrowsyState::Idle, AlarmAction::None),
            (DrowsyState::Alarmed { since }, true) => {
                (DrowsyState::Alarmed { since }, AlarmAction::None)
            }
            (DrowsyState::Alarmed { .. }, false) => (DrowsyState::Idle, AlarmAction::Stop),
        };
        self.state = next;
        action
    }
}
