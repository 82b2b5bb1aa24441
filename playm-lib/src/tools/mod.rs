//! Small standalone utilities.

pub mod timer;
