//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding vertex streams.
///
/// [`CodecError::OutputTooSmall`] is the ordinary capacity failure. The
/// remaining variants report caller contract violations or malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire format error.
    Wire(wire::WireError),

    /// Byte cursor error not covered by a more specific variant.
    Bytestream(bytestream::ByteError),

    /// Destination buffer ran out of capacity.
    OutputTooSmall { needed: usize, available: usize },

    /// Vertex size violates the format contract.
    InvalidVertexSize { vertex_size: usize },

    /// Source slice is shorter than `vertex_count * vertex_size`.
    SourceTooSmall { needed: usize, available: usize },

    /// A block was given zero vertices or more than the block maximum.
    InvalidBlockLength { vertex_count: usize, max: usize },

    /// Encoded input ended early.
    Truncated { needed: usize, available: usize },

    /// Bytes after the last block do not match the tail size.
    TrailingData { expected: usize, found: usize },
}

impl CodecError {
    /// Returns `true` if this error means the destination was too small.
    #[must_use]
    pub const fn is_capacity_exhausted(&self) -> bool {
        matches!(self, Self::OutputTooSmall { .. })
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Bytestream(e) => write!(f, "bytestream error: {e}"),
            Self::OutputTooSmall { needed, available } => {
                write!(f, "output too small: need {needed}, have {available}")
            }
            Self::InvalidVertexSize { vertex_size } => {
                write!(
                    f,
                    "invalid vertex size {vertex_size}: must be 1..=256 and a multiple of 4"
                )
            }
            Self::SourceTooSmall { needed, available } => {
                write!(f, "source too small: need {needed} bytes, have {available}")
            }
            Self::InvalidBlockLength { vertex_count, max } => {
                write!(f, "block of {vertex_count} vertices outside 1..={max}")
            }
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated stream: need {needed} bytes, have {available}"
                )
            }
            Self::TrailingData { expected, found } => {
                write!(
                    f,
                    "expected {expected} tail bytes after the last block, found {found}"
                )
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Bytestream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bytestream::ByteError> for CodecError {
    fn from(err: bytestream::ByteError) -> Self {
        match err {
            bytestream::ByteError::Overflow {
                requested,
                available,
            } => Self::OutputTooSmall {
                needed: requested,
                available,
            },
            bytestream::ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::Truncated {
                needed: requested,
                available,
            },
            other @ bytestream::ByteError::InvalidOffset { .. } => Self::Bytestream(other),
        }
    }
}

impl From<wire::WireError> for CodecError {
    fn from(err: wire::WireError) -> Self {
        match err {
            wire::WireError::Bytestream(inner) => inner.into(),
            wire::WireError::InvalidVertexSize { vertex_size } => {
                Self::InvalidVertexSize { vertex_size }
            }
            other => Self::Wire(other),
        }
    }
}
