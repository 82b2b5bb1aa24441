//! The seam between the player and the host audio facility.
//!
//! An [`AudioOutput`] plays one file at a time. It reports how long the
//! current file has been playing since it was loaded and signals when the
//! file runs out.

mod device;
mod null;

use std::path::Path;

use crate::error::PlaymError;

pub use device::RodioOutput;
pub use null::NullOutput;

/// A single-file audio player.
pub trait AudioOutput {
    /// Load `path` and start playing it `start_secs` into the file.
    ///
    /// The previous file is unloaded first, even when loading `path` fails.
    /// Returns the position playback actually started from, which is `0.0`
    /// when the file cannot seek. The reported [`position`] restarts at zero
    /// regardless of the start.
    ///
    /// [`position`]: AudioOutput::position
    fn play_file(&mut self, path: &Path, start_secs: f64) -> Result<f64, PlaymError>;

    fn pause(&mut self);

    fn resume(&mut self);

    /// Stop and unload the current file.
    fn stop(&mut self);

    /// True while a file is loaded and has not run out.
    fn is_busy(&self) -> bool;

    /// Seconds played since the last [`play_file`](AudioOutput::play_file).
    fn position(&self) -> f64;

    /// Linear gain, `1.0` being unity.
    fn set_volume(&mut self, volume: f32);

    /// Drain pending completion notifications.
    ///
    /// Returns `true` if the currently loaded file reached its end since the
    /// last call.
    fn take_finished(&mut self) -> bool;
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn play_file(&mut self, path: &Path, start_secs: f64) -> Result<f64, PlaymError> {
        (**self).play_file(path, start_secs)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn resume(&mut self) {
        (**self).resume()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }

    fn position(&self) -> f64 {
        (**self).position()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn take_finished(&mut self) -> bool {
        (**self).take_finished()
    }
}
