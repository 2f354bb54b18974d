use std::fmt;
use std::io;

use crate::board::MoveParseError;

/// Error type for a game session
#[derive(Debug)]
pub enum SessionError {
    /// Reading from the move source or writing to the sink failed
    Io(io::Error),
    /// The opponent's move could not be applied to our board
    Parse(MoveParseError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "I/O error: {e}"),
            SessionError::Parse(e) => write!(f, "Invalid opponent move: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) => Some(e),
            SessionError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<MoveParseError> for SessionError {
    fn from(e: MoveParseError) -> Self {
        SessionError::Parse(e)
    }
}
