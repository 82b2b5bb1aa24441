//! Console command parsing.

use std::fmt::{Display, Formatter};
use std::num::IntErrorKind;

/// One console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pause,
    Play,
    Stop,
    Next,
    Unnext,
    /// Zero-based playlist index as typed; may be negative. Numbers too
    /// large for `i64` saturate.
    Track(i64),
    All,
    Seek(f64),
    Time,
    Exit,
    Help,
    Volume(f32),
    Logs,
}

/// A recognised command whose argument is not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    InvalidTrack(String),
    InvalidSeconds(String),
    InvalidVolume(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTrack(arg) => write!(f, "invalid track number: {}", arg),
            Self::InvalidSeconds(arg) => write!(f, "invalid number of seconds: {}", arg),
            Self::InvalidVolume(arg) => write!(f, "invalid volume: {}", arg),
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP_TEXT: &str = "\
commands:
  play            resume, or start the next track
  pause           pause / unpause
  stop            stop playback
  next            next track
  unnext          previous track
  track <n>       play track n (0 is the first track)
  all             list tracks
  seek <seconds>  jump to a position in the current track
  time            show track length, elapsed and remaining time
  volume <0-100>  set the volume
  logs            show recent log lines
  exit            stop and quit";

/// Parse one input line.
///
/// Input is trimmed and lower-cased. Returns `Ok(None)` for blank lines,
/// unknown commands and commands with the wrong number of arguments.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim().to_lowercase();
    let words: Vec<&str> = line.split_whitespace().collect();

    let command = match words.as_slice() {
        ["pause"] => Command::Pause,
        ["play"] => Command::Play,
        ["stop"] => Command::Stop,
        ["next"] => Command::Next,
        ["unnext"] => Command::Unnext,
        ["all"] => Command::All,
        ["time"] => Command::Time,
        ["exit"] => Command::Exit,
        ["help"] => Command::Help,
        ["logs"] => Command::Logs,
        ["track", arg] => match arg.parse::<i64>() {
            Ok(index) => Command::Track(index),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Command::Track(i64::MAX),
                IntErrorKind::NegOverflow => Command::Track(i64::MIN),
                _ => return Err(CommandError::InvalidTrack(arg.to_string())),
            },
        },
        ["seek", arg] => match arg.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() => Command::Seek(seconds),
            _ => return Err(CommandError::InvalidSeconds(arg.to_string())),
        },
        ["volume", arg] => match arg.parse::<f32>() {
            Ok(percent) if percent.is_finite() => Command::Volume(percent),
            _ => return Err(CommandError::InvalidVolume(arg.to_string())),
        },
        _ => return Ok(None),
    };

    Ok(Some(command))
}
