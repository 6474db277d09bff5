//! Error types for stream framing operations.

use std::fmt;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised by stream framing and layout validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// The format byte does not carry the vertex stream tag.
    InvalidTag { found: u8 },

    /// The stream version is not understood by this decoder.
    UnsupportedVersion { found: u8 },

    /// The requested version does not fit in the format byte.
    InvalidVersion { version: u8 },

    /// The vertex size is zero, larger than the maximum, or misaligned.
    InvalidVertexSize { vertex_size: usize },

    /// The encoded size bound does not fit in `usize`.
    BoundOverflow {
        vertex_count: usize,
        vertex_size: usize,
    },

    /// Byte cursor error while writing or reading framing bytes.
    Bytestream(bytestream::ByteError),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTag { found } => {
                write!(f, "invalid format byte: 0x{found:02X}")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported stream version: {found}")
            }
            Self::InvalidVersion { version } => {
                write!(f, "version {version} does not fit in the format byte")
            }
            Self::InvalidVertexSize { vertex_size } => {
                write!(
                    f,
                    "invalid vertex size {vertex_size}: must be 1..=256 and a multiple of 4"
                )
            }
            Self::BoundOverflow {
                vertex_count,
                vertex_size,
            } => {
                write!(
                    f,
                    "encoded size of {vertex_count} vertices of {vertex_size} bytes overflows usize"
                )
            }
            Self::Bytestream(err) => write!(f, "bytestream error: {err}"),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bytestream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bytestream::ByteError> for WireError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Bytestream(err)
    }
}
