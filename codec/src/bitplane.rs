//! Bit-plane transposition encoding.
//!
//! An alternative format over the same vertex arrays, kept for comparison
//! with the primary stream. It does not interoperate with
//! [`decode_vertex_buffer`](crate::decode_vertex_buffer).
//!
//! Every 4-byte word offset of the vertex is a channel. Words are rotated
//! left by one, delta coded against the previous rotated word of the channel,
//! and sign folded. Each chunk of 32 words is transposed into 32 bit planes;
//! a 32-bit mask marks the nonzero planes, which follow in ascending order.
//! All words are little-endian.

use bytestream::{ByteReader, ByteWriter};
use wire::{validate_vertex_size, WireError};

use crate::error::{CodecError, CodecResult};
use crate::stream::{byte_len, source_vertices};

/// Number of words per transposed chunk.
pub const BITPLANE_CHUNK: usize = 32;

/// Low 31 bits, flipped when a delta is negative.
const FOLD_MASK: u32 = 0x7FFF_FFFF;

type Chunk = [u32; BITPLANE_CHUNK];

#[inline]
const fn fold(value: u32, last: u32) -> u32 {
    let delta = value.wrapping_sub(last);
    if delta >> 31 != 0 {
        delta ^ FOLD_MASK
    } else {
        delta
    }
}

#[inline]
const fn unfold(folded: u32, last: u32) -> u32 {
    let delta = if folded >> 31 != 0 {
        folded ^ FOLD_MASK
    } else {
        folded
    };
    last.wrapping_add(delta)
}

/// Transposes a 32x32 bit matrix: bit `c` of output `r` is bit `r` of input `c`.
///
/// The transform is its own inverse.
#[must_use]
pub fn transpose(words: &Chunk) -> Chunk {
    let mut planes = [0u32; BITPLANE_CHUNK];
    for (r, plane) in planes.iter_mut().enumerate() {
        for (c, word) in words.iter().enumerate() {
            *plane |= ((word >> r) & 1) << c;
        }
    }
    planes
}

/// Returns an upper bound on the output of [`encode_bitplane`].
pub fn encode_bitplane_bound(vertex_count: usize, vertex_size: usize) -> CodecResult<usize> {
    validate_vertex_size(vertex_size)?;
    let chunks = vertex_count.div_ceil(BITPLANE_CHUNK);
    chunks
        .checked_mul(vertex_size / 4 * (1 + BITPLANE_CHUNK) * 4)
        .ok_or(CodecError::Wire(WireError::BoundOverflow {
            vertex_count,
            vertex_size,
        }))
}

/// Encodes `vertex_count` vertices in the bit-plane format.
///
/// Returns the number of bytes written.
pub fn encode_bitplane(
    out: &mut [u8],
    vertices: &[u8],
    vertex_count: usize,
    vertex_size: usize,
) -> CodecResult<usize> {
    validate_vertex_size(vertex_size)?;
    let vertex_data = source_vertices(vertices, vertex_count, vertex_size)?;
    let mut writer = ByteWriter::new(out);

    for k in (0..vertex_size).step_by(4) {
        let mut last = 0u32;

        for chunk in vertex_data.chunks(BITPLANE_CHUNK * vertex_size) {
            let mut words: Chunk = [0; BITPLANE_CHUNK];
            for (word, vertex) in words.iter_mut().zip(chunk.chunks_exact(vertex_size)) {
                let raw = u32::from_le_bytes([vertex[k], vertex[k + 1], vertex[k + 2], vertex[k + 3]]);
                let rotated = raw.rotate_left(1);
                *word = fold(rotated, last);
                last = rotated;
            }

            let planes = transpose(&words);
            let mask = planes
                .iter()
                .enumerate()
                .filter(|(_, plane)| **plane != 0)
                .fold(0u32, |mask, (r, _)| mask | (1 << r));

            writer.ensure(4 * (1 + mask.count_ones() as usize))?;
            writer.write_u32_le(mask)?;
            for plane in planes.iter().filter(|plane| **plane != 0) {
                writer.write_u32_le(*plane)?;
            }
        }
    }

    let written = writer.finish();
    log::debug!("bitplane encoded {vertex_count} vertices of {vertex_size} bytes into {written} bytes");
    Ok(written)
}

/// Decodes a stream produced by [`encode_bitplane`] into `out`.
pub fn decode_bitplane(
    out: &mut [u8],
    vertex_count: usize,
    vertex_size: usize,
    encoded: &[u8],
) -> CodecResult<()> {
    validate_vertex_size(vertex_size)?;
    let needed = byte_len(vertex_count, vertex_size)?;
    if out.len() < needed {
        return Err(CodecError::OutputTooSmall {
            needed,
            available: out.len(),
        });
    }
    let mut reader = ByteReader::new(encoded);

    for k in (0..vertex_size).step_by(4) {
        let mut last = 0u32;

        for chunk in out[..needed].chunks_mut(BITPLANE_CHUNK * vertex_size) {
            let mask = reader.read_u32_le()?;
            let mut planes: Chunk = [0; BITPLANE_CHUNK];
            for (r, plane) in planes.iter_mut().enumerate() {
                if mask & (1 << r) != 0 {
                    *plane = reader.read_u32_le()?;
                }
            }

            let words = transpose(&planes);
            for (word, vertex) in words.iter().zip(chunk.chunks_exact_mut(vertex_size)) {
                let rotated = unfold(*word, last);
                last = rotated;
                vertex[k..k + 4].copy_from_slice(&rotated.rotate_right(1).to_le_bytes());
            }
        }
    }

    if !reader.is_empty() {
        return Err(CodecError::TrailingData {
            expected: 0,
            found: reader.remaining(),
        });
    }
    Ok(())
}
