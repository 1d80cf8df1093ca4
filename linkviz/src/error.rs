use alloc::string::String;
use core::fmt;

use crate::NodeId;

/// Why an operation was refused. A refused operation never changes the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpError {
    /// `position` is outside `0..len` (or `0..=len` when `allow_end` is set).
    PositionOutOfRange {
        position: usize,
        len: usize,
        allow_end: bool,
    },
    UnknownNode(NodeId),
    /// Head/tail pointers follow the list and cannot be dragged on their own.
    PointerNotMovable(NodeId),
    InvalidSequence(SequenceError),
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfRange {
                position,
                len,
                allow_end: true,
            } => write!(
                f,
                "invalid position {position}: must be between 0 and {len}"
            ),
            Self::PositionOutOfRange { position, len, .. } if *len == 0 => {
                write!(f, "invalid position {position}: the list is empty")
            }
            Self::PositionOutOfRange { position, len, .. } => write!(
                f,
                "invalid position {position}: must be between 0 and {}",
                len - 1
            ),
            Self::UnknownNode(id) => write!(f, "no node with id `{id}`"),
            Self::PointerNotMovable(id) => write!(f, "pointer `{id}` follows the list"),
            Self::InvalidSequence(e) => write!(f, "invalid sequence: {e}"),
        }
    }
}

impl core::error::Error for OpError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidSequence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SequenceError> for OpError {
    fn from(value: SequenceError) -> Self {
        Self::InvalidSequence(value)
    }
}

/// A user-supplied value sequence could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequenceError {
    Empty,
    InvalidNumber { index: usize, token: String },
    /// The input looked like JSON but did not parse.
    Json(String),
    /// Valid JSON, but not an array of integers.
    NotAnArray,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no values given"),
            Self::InvalidNumber { index, token } => {
                write!(f, "value #{index} (`{token}`) is not an integer")
            }
            Self::Json(msg) => write!(f, "malformed JSON: {msg}"),
            Self::NotAnArray => f.write_str("expected a JSON array of integers"),
        }
    }
}

impl core::error::Error for SequenceError {}
