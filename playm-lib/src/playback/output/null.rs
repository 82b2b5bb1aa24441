use std::path::{Path, PathBuf};

use log::info;

use super::AudioOutput;
use crate::error::PlaymError;
use crate::tools::timer::Timer;

/// Silent [`AudioOutput`] whose position is a wall-clock stopwatch.
///
/// Used when no sound device is wanted. Files are only checked for
/// existence, never decoded, so they never run out on their own; call
/// [`finish_current`](NullOutput::finish_current) to simulate the end of a
/// file.
#[derive(Debug, Default)]
pub struct NullOutput {
    loaded: Option<PathBuf>,
    clock: Timer,
    volume: f32,
    finished: bool,
    finish_pending: bool,
}

impl NullOutput {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            ..Self::default()
        }
    }

    /// Path of the loaded file, if any.
    pub fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.loaded.is_some() && !self.finished && !self.clock.is_running()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Mark the loaded file as played to the end.
    pub fn finish_current(&mut self) {
        if self.loaded.is_some() && !self.finished {
            self.clock.pause();
            self.finished = true;
            self.finish_pending = true;
        }
    }
}

impl AudioOutput for NullOutput {
    fn play_file(&mut self, path: &Path, start_secs: f64) -> Result<f64, PlaymError> {
        self.stop();
        if !path.is_file() {
            return Err(PlaymError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        self.loaded = Some(path.to_path_buf());
        self.clock.restart();
        info!("(silent) playing {} from {:.1}s", path.display(), start_secs);
        Ok(start_secs)
    }

    fn pause(&mut self) {
        self.clock.pause();
    }

    fn resume(&mut self) {
        if self.loaded.is_some() && !self.finished {
            self.clock.resume();
        }
    }

    fn stop(&mut self) {
        self.loaded = None;
        self.finished = false;
        self.finish_pending = false;
        self.clock.reset();
    }

    fn is_busy(&self) -> bool {
        self.loaded.is_some() && !self.finished
    }

    fn position(&self) -> f64 {
        self.clock.get_time().as_secs_f64()
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.max(0.0);
    }

    fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finish_pending)
    }
}
