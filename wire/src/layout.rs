//! Block, group, and tail layout rules.
//!
//! Block boundaries and channel order are not stored in the stream. Encoder
//! and decoder both derive them from `vertex_size` with the functions here.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{WireError, WireResult};
use crate::header::FORMAT_TAG;

/// Scratch budget for one block, in bytes.
pub const BLOCK_SIZE_BYTES: usize = 8192;

/// Maximum number of vertices in one block.
pub const BLOCK_MAX_VERTICES: usize = 256;

/// Number of delta bytes in one byte group.
pub const BYTE_GROUP_SIZE: usize = 16;

/// Worst-case encoded size of one byte group.
///
/// The encoder refuses to start a group with less headroom than this, so a
/// decoder may read this many bytes per group without further checks.
pub const BYTE_GROUP_DECODE_LIMIT: usize = 24;

/// Minimum size of the stream tail.
pub const TAIL_MIN_SIZE: usize = 32;

/// Largest supported vertex size in bytes.
pub const MAX_VERTEX_SIZE: usize = 256;

const _: () = assert!(FORMAT_TAG & 0x0F == 0);
const _: () = assert!(BLOCK_MAX_VERTICES % BYTE_GROUP_SIZE == 0);

/// Checks the primary format's vertex size contract.
pub const fn validate_vertex_size(vertex_size: usize) -> WireResult<()> {
    if vertex_size == 0 || vertex_size > MAX_VERTEX_SIZE || vertex_size % 4 != 0 {
        return Err(WireError::InvalidVertexSize { vertex_size });
    }
    Ok(())
}

/// Returns the number of vertices per block for `vertex_size`.
///
/// The block must fit the scratch budget and is truncated to a whole number
/// of byte groups.
#[must_use]
pub const fn vertex_block_size(vertex_size: usize) -> usize {
    let result = (BLOCK_SIZE_BYTES / vertex_size) & !(BYTE_GROUP_SIZE - 1);
    if result < BLOCK_MAX_VERTICES {
        result
    } else {
        BLOCK_MAX_VERTICES
    }
}

/// Rounds a block length up to a whole number of byte groups.
#[must_use]
pub const fn padded_group_len(block_len: usize) -> usize {
    (block_len + BYTE_GROUP_SIZE - 1) & !(BYTE_GROUP_SIZE - 1)
}

/// Returns the number of 2-bit selector header bytes for `group_count` groups.
#[must_use]
pub const fn group_header_size(group_count: usize) -> usize {
    (group_count + 3) / 4
}

/// Returns the tail size for `vertex_size`.
#[must_use]
pub const fn tail_size(vertex_size: usize) -> usize {
    if vertex_size < TAIL_MIN_SIZE {
        TAIL_MIN_SIZE
    } else {
        vertex_size
    }
}

/// Returns an upper bound on the encoded size of `vertex_count` vertices.
///
/// A destination at least this large never runs out of capacity. Fails if the
/// vertex size is invalid or the bound does not fit in `usize`.
pub const fn encode_bound(vertex_count: usize, vertex_size: usize) -> WireResult<usize> {
    if let Err(err) = validate_vertex_size(vertex_size) {
        return Err(err);
    }
    let block_size = vertex_block_size(vertex_size);
    let block_count = vertex_count.div_ceil(block_size);
    let block_header_size = group_header_size(block_size / BYTE_GROUP_SIZE);
    let block_bytes = vertex_size * (block_header_size + block_size);

    match block_count.checked_mul(block_bytes) {
        Some(blocks) => match blocks.checked_add(1 + tail_size(vertex_size)) {
            Some(bound) => Ok(bound),
            None => Err(WireError::BoundOverflow {
                vertex_count,
                vertex_size,
            }),
        },
        None => Err(WireError::BoundOverflow {
            vertex_count,
            vertex_size,
        }),
    }
}

/// Writes the tail: zero padding up to [`TAIL_MIN_SIZE`] followed by `first_vertex`.
pub fn write_tail(first_vertex: &[u8], writer: &mut ByteWriter<'_>) -> WireResult<()> {
    let vertex_size = first_vertex.len();
    writer.ensure(tail_size(vertex_size))?;
    if vertex_size < TAIL_MIN_SIZE {
        writer.write_zeros(TAIL_MIN_SIZE - vertex_size)?;
    }
    writer.write_bytes(first_vertex)?;
    Ok(())
}

/// Returns the first vertex stored at the end of an encoded stream.
pub fn read_tail_vertex<'a>(reader: &ByteReader<'a>, vertex_size: usize) -> WireResult<&'a [u8]> {
    Ok(reader.tail(vertex_size)?)
}
