//! Pausable stopwatch used where no audio device reports a play position.

use std::time::{Duration, Instant};

/// Wall-clock stopwatch that can be paused and resumed.
///
/// `accumulated` holds the time banked by earlier running spans; `running_since`
/// is set while the stopwatch is counting.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and start counting.
    pub fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    /// Bank the running span and stop counting. No-op when already paused.
    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    /// Continue counting from the banked time. No-op when already running.
    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Stop counting and clear the banked time.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = None;
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total counted time.
    pub fn get_time(&self) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + since.elapsed(),
            None => self.accumulated,
        }
    }
}
