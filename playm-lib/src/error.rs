use std::fmt::{Display, Formatter};

/// Error type for playlist scanning, metadata probing and audio output.
#[derive(Debug)]
pub enum PlaymError {
    Io(std::io::Error),
    Probe(String),
    Decode(String),
    Output(String),
    Json(serde_json::Error),
}

impl Display for PlaymError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Probe(err) => write!(f, "probe error: {}", err),
            Self::Decode(err) => write!(f, "decode error: {}", err),
            Self::Output(err) => write!(f, "audio output error: {}", err),
            Self::Json(err) => write!(f, "json error: {}", err),
        }
    }
}

impl std::error::Error for PlaymError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlaymError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PlaymError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<symphonia::core::errors::Error> for PlaymError {
    fn from(value: symphonia::core::errors::Error) -> Self {
        Self::Probe(value.to_string())
    }
}
