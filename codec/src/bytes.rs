//! Group sequence encoding: one channel of one block.
//!
//! Layout: `ceil(groups / 4)` selector header bytes, then each group's payload
//! in order.

use bytestream::{ByteReader, ByteWriter};
use wire::{group_header_size, GroupWidth, BYTE_GROUP_DECODE_LIMIT, BYTE_GROUP_SIZE};

use crate::error::CodecResult;
use crate::group::{decode_group, encode_group, ByteGroup, GroupBuffer};
use crate::stats::StatsSink;

/// Trial order after the 8-bit baseline. Earlier widths win ties.
const CANDIDATE_WIDTHS: [GroupWidth; 3] = [GroupWidth::Bits1, GroupWidth::Bits2, GroupWidth::Bits4];

/// Picks the width with the smallest encoding and returns it with its size.
///
/// The 8-bit encoding is the baseline; another width replaces it only if it
/// is strictly smaller.
pub fn select_group_width(group: &ByteGroup) -> (GroupWidth, usize) {
    let mut scratch: GroupBuffer = [0; BYTE_GROUP_DECODE_LIMIT];
    let mut best = (GroupWidth::Bits8, BYTE_GROUP_SIZE);

    for width in CANDIDATE_WIDTHS {
        if let Some(size) = encode_group(group, width, &mut scratch) {
            if size < best.1 {
                best = (width, size);
            }
        }
    }
    best
}

/// Encodes a channel's groups: selector header followed by packed payloads.
///
/// Each group needs [`BYTE_GROUP_DECODE_LIMIT`] bytes of headroom before it is
/// attempted. Fails as a whole if the header or any group does not fit.
pub fn encode_bytes<S>(
    groups: &[ByteGroup],
    channel: usize,
    writer: &mut ByteWriter<'_>,
    stats: &mut S,
) -> CodecResult<()>
where
    S: StatsSink + ?Sized,
{
    let header_size = group_header_size(groups.len());
    let header = writer.reserve_zeroed(header_size)?;

    let mut scratch: GroupBuffer = [0; BYTE_GROUP_DECODE_LIMIT];
    for (index, group) in groups.iter().enumerate() {
        writer.ensure(BYTE_GROUP_DECODE_LIMIT)?;

        let (width, size) = select_group_width(group);
        let (slot, bits) = width.header_slot(index);
        writer.or_at(header + slot, bits)?;

        if let Some(len) = encode_group(group, width, &mut scratch) {
            debug_assert_eq!(len, size);
            writer.write_bytes(&scratch[..len])?;
        }

        stats.record_group(channel, width, size);
    }

    stats.record_header(channel, header_size);
    Ok(())
}

/// Decodes `groups.len()` groups written by [`encode_bytes`].
pub fn decode_bytes(reader: &mut ByteReader<'_>, groups: &mut [ByteGroup]) -> CodecResult<()> {
    let header = reader.read_bytes(group_header_size(groups.len()))?;

    for (index, group) in groups.iter_mut().enumerate() {
        reader.ensure(BYTE_GROUP_DECODE_LIMIT)?;
        let width = GroupWidth::from_code(header[index / 4] >> ((index % 4) * 2));
        *group = decode_group(width, reader)?;
    }
    Ok(())
}
