//! Playlist discovery.
//!
//! A [`Playlist`] is the ordered list of MP3 files found directly inside a
//! directory. It is built once at startup and never changes afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::constants::TRACK_EXTENSION;
use crate::container::info::get_duration;
use crate::error::PlaymError;

/// Immutable, ordered list of track paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
}

/// Serializable description of one playlist entry.
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    /// Zero-based playlist index.
    pub index: usize,
    pub name: String,
    pub path: String,
    /// `None` when the file could not be probed.
    pub duration_secs: Option<f64>,
}

impl Playlist {
    /// Scan `dir` (non-recursively) for files with the track extension.
    ///
    /// Entries are sorted by file name. Entries that cannot be read are
    /// skipped with a warning.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self, PlaymError> {
        let dir = dir.as_ref();
        let mut tracks = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        "unexpected error when listing '{}': {}, skipping",
                        dir.display(),
                        err
                    );
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_track(&path) {
                tracks.push(path);
            }
        }

        tracks.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        info!("found {} tracks in {}", tracks.len(), dir.display());

        Ok(Self { tracks })
    }

    /// Build a playlist from explicit paths, kept in the given order.
    pub fn from_paths(tracks: Vec<PathBuf>) -> Self {
        Self { tracks }
    }

    /// Consume the playlist and return it in random order.
    pub fn shuffled(mut self) -> Self {
        self.tracks.shuffle(&mut rand::thread_rng());
        self
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.tracks.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.tracks.iter().map(PathBuf::as_path)
    }

    /// Display name of the track at `index` (its file name).
    pub fn name(&self, index: usize) -> Option<String> {
        self.get(index).map(display_name)
    }

    /// Summaries of every track, probing each file for its duration.
    pub fn summaries(&self) -> Vec<TrackSummary> {
        self.iter()
            .enumerate()
            .map(|(index, path)| TrackSummary {
                index,
                name: display_name(path),
                path: path.display().to_string(),
                duration_secs: match get_duration(path) {
                    Ok(seconds) => Some(seconds),
                    Err(err) => {
                        warn!("could not read duration of {}: {}", path.display(), err);
                        None
                    }
                },
            })
            .collect()
    }

    /// Pretty JSON array of [`TrackSummary`] values.
    pub fn to_json(&self) -> Result<String, PlaymError> {
        Ok(serde_json::to_string_pretty(&self.summaries())?)
    }
}

fn is_track(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(TRACK_EXTENSION))
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
