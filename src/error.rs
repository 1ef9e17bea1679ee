//! Error types for gila's terminal input.

use std::fmt;
use std::io;

/// Result type alias for terminal input operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for terminal input operations.
///
/// Decoding never fails; incomplete or unrecognized bytes are reported as
/// [`Event::None`](crate::input::Event::None). Only the descriptor side of a
/// session can error, and such errors end the interactive session.
#[derive(Debug)]
pub enum Error {
    /// I/O error from the readiness wait, the read, or the size query.
    Io(io::Error),
    /// The terminal descriptor reached end-of-file or hung up.
    Disconnected,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Disconnected => write!(f, "terminal disconnected"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
