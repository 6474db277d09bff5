//! Error types for byte cursor operations.

use std::fmt;

/// Result type for byte cursor operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing through a byte cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to write more bytes than the destination can hold.
    ///
    /// Nothing is written when this error is returned.
    Overflow {
        /// Number of bytes the write needed.
        requested: usize,
        /// Number of bytes left in the destination.
        available: usize,
    },

    /// Attempted to read past the end of the source.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Attempted to patch a byte outside the already written region.
    InvalidOffset {
        /// The offset that was addressed.
        offset: usize,
        /// Number of bytes written so far.
        written: usize,
    },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to write {requested} bytes but only {available} bytes of capacity remain"
                )
            }
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::InvalidOffset { offset, written } => {
                write!(
                    f,
                    "offset {offset} is outside the {written} bytes written so far"
                )
            }
        }
    }
}

impl std::error::Error for ByteError {}
