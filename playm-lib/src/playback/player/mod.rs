//! High-level playback controller for a playlist.

mod controls;
mod timing;

use std::path::Path;

use log::{debug, error, info, warn};

use crate::constants::DEFAULT_VOLUME_PERCENT;
use crate::container::info::get_duration;
use crate::error::PlaymError;
use crate::playback::output::AudioOutput;
use crate::playlist::Playlist;

pub use timing::clamp_seek;

/// Looks up the duration of a track in seconds.
pub type DurationProbe = Box<dyn Fn(&Path) -> Result<f64, PlaymError>>;

/// Primary playback controller.
///
/// `Player` owns the playlist, the audio output and the transport state:
/// which track is current, whether it is paused, and the offset the current
/// track was started from. Elapsed time is the output's reported position
/// plus that offset.
pub struct Player<O: AudioOutput> {
    playlist: Playlist,
    output: O,
    current: Option<usize>,
    paused: bool,
    seek_offset: f64,
    auto_advance: bool,
    volume_percent: f32,
    durations: Vec<Option<Option<f64>>>,
    probe: DurationProbe,
}

impl<O: AudioOutput> Player<O> {
    /// Create a stopped player reading durations from track metadata.
    pub fn new(playlist: Playlist, output: O) -> Self {
        Self::with_probe(playlist, output, Box::new(|path: &Path| get_duration(path)))
    }

    /// Create a stopped player with a custom duration lookup.
    pub fn with_probe(playlist: Playlist, output: O, probe: DurationProbe) -> Self {
        let durations = vec![None; playlist.len()];
        let mut this = Self {
            playlist,
            output,
            current: None,
            paused: false,
            seek_offset: 0.0,
            auto_advance: true,
            volume_percent: DEFAULT_VOLUME_PERCENT,
            durations,
            probe,
        };
        this.set_volume(DEFAULT_VOLUME_PERCENT);
        this
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Zero-based index of the current track.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.and_then(|index| self.playlist.get(index))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while the output has a file loaded that has not run out.
    pub fn is_busy(&self) -> bool {
        self.output.is_busy()
    }

    pub fn volume_percent(&self) -> f32 {
        self.volume_percent
    }

    /// Handle completion notifications from the output.
    ///
    /// When the current track ran out, advances to the next one unless a
    /// seek to the end guard switched auto-advance off for this track.
    /// Returns `true` if the current track finished.
    pub fn poll_events(&mut self) -> bool {
        if !self.output.take_finished() {
            return false;
        }

        if self.auto_advance {
            info!("track finished, advancing");
            self.next();
        } else {
            debug!("track finished with auto-advance off");
        }
        true
    }

    /// Duration of the track at `index`, probed once and cached.
    ///
    /// `None` when the file could not be probed.
    fn duration_of(&mut self, index: usize) -> Option<f64> {
        if let Some(cached) = self.durations.get(index).copied().flatten() {
            return cached;
        }

        let path = self.playlist.get(index)?;
        let duration = match (self.probe)(path) {
            Ok(seconds) => Some(seconds),
            Err(err) => {
                warn!("could not read duration of {}: {}", path.display(), err);
                None
            }
        };
        if let Some(slot) = self.durations.get_mut(index) {
            *slot = Some(duration);
        }
        duration
    }

    /// Load the current track into the output, `start_secs` into the file.
    ///
    /// Clears the pause flag and re-enables auto-advance. A file that fails
    /// to load is logged and leaves the player stopped on that index.
    fn load_current(&mut self, start_secs: f64) {
        let index = match self.current {
            Some(index) => index,
            None => return,
        };
        self.duration_of(index);

        let path = match self.playlist.get(index) {
            Some(path) => path,
            None => return,
        };

        self.paused = false;
        self.auto_advance = true;

        match self.output.play_file(path, start_secs) {
            Ok(started_at) => self.seek_offset = started_at,
            Err(err) => {
                error!("failed to play {}: {}", path.display(), err);
                self.output.stop();
                self.seek_offset = 0.0;
            }
        }
    }
}
