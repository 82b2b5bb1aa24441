//! Playback: audio outputs and the transport-state manager driving them.

pub mod output;
pub mod player;
