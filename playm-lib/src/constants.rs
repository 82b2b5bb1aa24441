//! Shared constants for scanning and playback defaults.

/// Directory scanned when none is given on the command line.
pub const DEFAULT_MUSIC_DIR: &str = "music";

/// File extension (without the dot) of playable tracks.
pub const TRACK_EXTENSION: &str = "mp3";

/// Seconds kept clear of the end of a track when seeking.
///
/// Seeking any closer than this to the end clamps to `duration - END_GUARD_SECS`.
pub const END_GUARD_SECS: f64 = 2.0;

/// Default playback volume as a percentage.
pub const DEFAULT_VOLUME_PERCENT: f32 = 100.0;

pub(crate) const OUTPUT_STREAM_OPEN_RETRIES: usize = 20;
pub(crate) const OUTPUT_STREAM_OPEN_RETRY_MS: u64 = 100;
