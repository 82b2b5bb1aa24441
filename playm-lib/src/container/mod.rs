//! Per-file metadata helpers.

pub mod info;
