//! Adaptive byte group packing.
//!
//! A byte group is sixteen zigzag deltas of one channel. It is stored at one
//! of four widths:
//!
//! - 1 bit: only valid when every value is zero; no payload bytes.
//! - 2 or 4 bits: fixed-width fields packed most significant first. A value
//!   that does not fit stores the all-ones sentinel and its full byte is
//!   appended after the fixed part, in index order.
//! - 8 bits: the sixteen bytes verbatim.

use bytestream::ByteReader;
use wire::{GroupWidth, BYTE_GROUP_DECODE_LIMIT, BYTE_GROUP_SIZE};

use crate::error::CodecResult;

/// Sixteen zigzag deltas of one channel.
pub type ByteGroup = [u8; BYTE_GROUP_SIZE];

/// Stack buffer large enough for any encoded group.
pub type GroupBuffer = [u8; BYTE_GROUP_DECODE_LIMIT];

/// Encodes `group` at `width` into `out` and returns the encoded length.
///
/// Returns `None` when `width` cannot represent the group, which only happens
/// for [`GroupWidth::Bits1`] with a nonzero value.
pub fn encode_group(group: &ByteGroup, width: GroupWidth, out: &mut GroupBuffer) -> Option<usize> {
    match width {
        GroupWidth::Bits1 => group.iter().all(|&v| v == 0).then_some(0),
        GroupWidth::Bits8 => {
            out[..BYTE_GROUP_SIZE].copy_from_slice(group);
            Some(BYTE_GROUP_SIZE)
        }
        GroupWidth::Bits2 | GroupWidth::Bits4 => Some(encode_fields(group, width.bits(), out)),
    }
}

fn encode_fields(group: &ByteGroup, bits: u32, out: &mut GroupBuffer) -> usize {
    let per_byte = (8 / bits) as usize;
    let sentinel = ((1u32 << bits) - 1) as u8;
    let mut len = 0;

    for values in group.chunks_exact(per_byte) {
        let mut byte = 0u8;
        for &value in values {
            byte = (byte << bits) | value.min(sentinel);
        }
        out[len] = byte;
        len += 1;
    }

    for &value in group {
        if value >= sentinel {
            out[len] = value;
            len += 1;
        }
    }

    len
}

/// Decodes one group stored at `width`.
pub fn decode_group(width: GroupWidth, reader: &mut ByteReader<'_>) -> CodecResult<ByteGroup> {
    match width {
        GroupWidth::Bits1 => Ok([0; BYTE_GROUP_SIZE]),
        GroupWidth::Bits8 => Ok(reader.read_array::<BYTE_GROUP_SIZE>()?),
        GroupWidth::Bits2 | GroupWidth::Bits4 => decode_fields(width.bits(), reader),
    }
}

fn decode_fields(bits: u32, reader: &mut ByteReader<'_>) -> CodecResult<ByteGroup> {
    let per_byte = (8 / bits) as usize;
    let sentinel = ((1u32 << bits) - 1) as u8;
    let fixed = reader.read_bytes(BYTE_GROUP_SIZE / per_byte)?;

    let mut group = [0u8; BYTE_GROUP_SIZE];
    for (i, slot) in group.iter_mut().enumerate() {
        let shift = 8 - bits * (i % per_byte + 1) as u32;
        let field = (fixed[i / per_byte] >> shift) & sentinel;
        *slot = if field == sentinel {
            reader.read_u8()?
        } else {
            field
        };
    }
    Ok(group)
}
