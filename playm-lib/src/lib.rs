//! # Playm Library
//!
//! Scans a directory for MP3 files and drives sequential playback of them
//! through an [`AudioOutput`](playback::output::AudioOutput), keeping the
//! transport state (current track, pause flag, seek offset) needed to answer
//! elapsed/remaining time queries.

pub mod constants;
pub mod container;
pub mod error;
pub mod playback;
pub mod playlist;
pub mod tools;

pub use error::PlaymError;
