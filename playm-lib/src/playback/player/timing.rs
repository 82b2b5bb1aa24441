//! Elapsed/remaining time bookkeeping for `Player`.

use super::Player;
use crate::constants::END_GUARD_SECS;
use crate::playback::output::AudioOutput;

/// Clamp a seek target for a track of `duration` seconds.
///
/// Targets at or past `duration - END_GUARD_SECS` become exactly that value
/// and are reported as clamped. Negative targets become zero. With an
/// unknown duration only the lower bound applies.
pub fn clamp_seek(seconds: f64, duration: Option<f64>) -> (f64, bool) {
    let seconds = seconds.max(0.0);
    match duration {
        Some(duration) => {
            let limit = (duration - END_GUARD_SECS).max(0.0);
            if seconds >= limit {
                (limit, true)
            } else {
                (seconds, false)
            }
        }
        None => (seconds, false),
    }
}

impl<O: AudioOutput> Player<O> {
    /// Duration of the current track in seconds, `0.0` when unknown or idle.
    pub fn get_total_time(&self) -> f64 {
        self.current
            .and_then(|index| self.durations.get(index).copied().flatten())
            .flatten()
            .unwrap_or(0.0)
    }

    /// Seconds since the current track began, counting seeks.
    pub fn get_elapsed_time(&self) -> f64 {
        if self.current.is_some() && (self.output.is_busy() || self.paused) {
            self.output.position() + self.seek_offset
        } else {
            self.seek_offset
        }
    }

    /// Seconds left in the current track, never negative.
    pub fn get_remaining_time(&self) -> f64 {
        (self.get_total_time() - self.get_elapsed_time()).max(0.0)
    }
}
