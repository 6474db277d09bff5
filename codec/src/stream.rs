//! Primary stream encoding and decoding.

use bytestream::{ByteReader, ByteWriter};
use wire::{
    read_format_byte, read_tail_vertex, tail_size, validate_vertex_size, vertex_block_size,
    write_format_byte, write_tail, MAX_VERTEX_SIZE,
};

use crate::block::{decode_vertex_block, encode_vertex_block, Predictor};
use crate::config::EncoderConfig;
use crate::error::{CodecError, CodecResult};
use crate::stats::{NoStats, StatsSink};

/// Encodes `vertex_count` vertices of `vertex_size` bytes into `out`.
///
/// Returns the number of bytes written. If `out` is too small the call fails
/// with [`CodecError::OutputTooSmall`] and the contents of `out` must be
/// discarded. [`encode_vertex_buffer_bound`] gives a size that always fits.
pub fn encode_vertex_buffer(
    out: &mut [u8],
    vertices: &[u8],
    vertex_count: usize,
    vertex_size: usize,
) -> CodecResult<usize> {
    encode_vertex_buffer_with(
        out,
        vertices,
        vertex_count,
        vertex_size,
        &EncoderConfig::default(),
        &mut NoStats,
    )
}

/// Encodes like [`encode_vertex_buffer`] with an explicit configuration and
/// statistics sink.
pub fn encode_vertex_buffer_with<S>(
    out: &mut [u8],
    vertices: &[u8],
    vertex_count: usize,
    vertex_size: usize,
    config: &EncoderConfig,
    stats: &mut S,
) -> CodecResult<usize>
where
    S: StatsSink + ?Sized,
{
    validate_vertex_size(vertex_size)?;
    let format = config.format_byte()?;
    let vertex_data = source_vertices(vertices, vertex_count, vertex_size)?;

    let mut writer = ByteWriter::new(out);
    writer.ensure(1 + vertex_size)?;
    write_format_byte(format, &mut writer)?;

    let mut first_vertex = [0u8; MAX_VERTEX_SIZE];
    if vertex_count > 0 {
        first_vertex[..vertex_size].copy_from_slice(&vertex_data[..vertex_size]);
    }
    let first_vertex = &first_vertex[..vertex_size];

    let mut predictor = Predictor::new(first_vertex)?;
    let block_size = vertex_block_size(vertex_size);

    for (index, block) in vertex_data.chunks(block_size * vertex_size).enumerate() {
        log::trace!(
            "block {index}: {} vertices at offset {}",
            block.len() / vertex_size,
            writer.position()
        );
        encode_vertex_block(block, &mut predictor, &mut writer, stats).map_err(|err| {
            log::debug!("block {index} failed: {err}");
            err
        })?;
    }

    write_tail(first_vertex, &mut writer)?;

    let written = writer.finish();
    stats.record_stream(vertex_count, written);
    log::debug!(
        "encoded {vertex_count} vertices of {vertex_size} bytes into {written} bytes (version {})",
        format.version()
    );
    Ok(written)
}

/// Returns a destination size that is always large enough for
/// [`encode_vertex_buffer`].
pub fn encode_vertex_buffer_bound(vertex_count: usize, vertex_size: usize) -> CodecResult<usize> {
    Ok(wire::encode_bound(vertex_count, vertex_size)?)
}

/// Decodes a stream produced by [`encode_vertex_buffer`] into `out`.
///
/// `out` must hold at least `vertex_count * vertex_size` bytes. The stream
/// must end exactly with the tail.
pub fn decode_vertex_buffer(
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
    if encoded.len() < 1 + vertex_size {
        return Err(CodecError::Truncated {
            needed: 1 + vertex_size,
            available: encoded.len(),
        });
    }

    let mut reader = ByteReader::new(encoded);
    let format = read_format_byte(&mut reader)?;

    let mut predictor = Predictor::new(read_tail_vertex(&reader, vertex_size)?)?;
    let block_size = vertex_block_size(vertex_size);

    for block in out[..needed].chunks_mut(block_size * vertex_size) {
        decode_vertex_block(&mut reader, block, &mut predictor)?;
    }

    let expected = tail_size(vertex_size);
    if reader.remaining() != expected {
        return Err(CodecError::TrailingData {
            expected,
            found: reader.remaining(),
        });
    }

    log::debug!(
        "decoded {vertex_count} vertices of {vertex_size} bytes from {} bytes (version {})",
        encoded.len(),
        format.version()
    );
    Ok(())
}

pub(crate) fn byte_len(vertex_count: usize, vertex_size: usize) -> CodecResult<usize> {
    vertex_count
        .checked_mul(vertex_size)
        .ok_or(CodecError::SourceTooSmall {
            needed: usize::MAX,
            available: 0,
        })
}

pub(crate) fn source_vertices(
    vertices: &[u8],
    vertex_count: usize,
    vertex_size: usize,
) -> CodecResult<&[u8]> {
    let needed = byte_len(vertex_count, vertex_size)?;
    vertices
        .get(..needed)
        .ok_or(CodecError::SourceTooSmall {
            needed,
            available: vertices.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EncodeStats;

    fn encode(vertices: &[u8], vertex_size: usize) -> Vec<u8> {
        let count = vertices.len() / vertex_size;
        let mut out = vec![0u8; encode_vertex_buffer_bound(count, vertex_size).unwrap()];
        let len = encode_vertex_buffer(&mut out, vertices, count, vertex_size).unwrap();
        out.truncate(len);
        out
    }

    #[test]
    fn starts_with_format_byte() {
        let encoded = encode(&[1, 2, 3, 4], 4);
        assert_eq!(encoded[0], 0xA1);
    }

    #[test]
    fn configured_version_zero() {
        let mut out = [0u8; 64];
        let len = encode_vertex_buffer_with(
            &mut out,
            &[0; 4],
            1,
            4,
            &EncoderConfig::with_version(0),
            &mut NoStats,
        )
        .unwrap();
        assert_eq!(out[0], 0xA0);

        let mut decoded = [0xFFu8; 4];
        decode_vertex_buffer(&mut decoded, 1, 4, &out[..len]).unwrap();
        assert_eq!(decoded, [0; 4]);
    }

    #[test]
    fn empty_buffer_is_header_plus_tail() {
        let mut out = [0xEEu8; 64];
        let len = encode_vertex_buffer(&mut out, &[], 0, 12).unwrap();
        assert_eq!(len, 1 + 32);
        assert!(out[1..len].iter().all(|&b| b == 0));
    }

    #[test]
    fn needs_room_for_header_and_vertex() {
        let mut out = [0u8; 4];
        let err = encode_vertex_buffer(&mut out, &[0; 4], 1, 4).unwrap_err();
        assert_eq!(
            err,
            CodecError::OutputTooSmall {
                needed: 5,
                available: 4
            }
        );
    }

    #[test]
    fn rejects_misaligned_vertex_size() {
        let mut out = [0u8; 64];
        for vertex_size in [0, 3, 6, 260] {
            let err = encode_vertex_buffer(&mut out, &[0; 8], 1, vertex_size).unwrap_err();
            assert_eq!(err, CodecError::InvalidVertexSize { vertex_size });
            assert!(!err.is_capacity_exhausted());
        }
    }

    #[test]
    fn rejects_short_source() {
        let mut out = [0u8; 256];
        let err = encode_vertex_buffer(&mut out, &[0; 7], 2, 4).unwrap_err();
        assert_eq!(
            err,
            CodecError::SourceTooSmall {
                needed: 8,
                available: 7
            }
        );
    }

    #[test]
    fn rejects_unrepresentable_version() {
        let mut out = [0u8; 64];
        let err = encode_vertex_buffer_with(
            &mut out,
            &[0; 4],
            1,
            4,
            &EncoderConfig::with_version(16),
            &mut NoStats,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Wire(_)));
    }

    #[test]
    fn multi_block_roundtrip() {
        // 48-byte vertices -> 160 per block, 3 blocks
        let vertices: Vec<u8> = (0..400u32)
            .flat_map(|i| (0..12u32).flat_map(move |c| (i * (c + 1)).to_le_bytes()))
            .collect();
        let encoded = encode(&vertices, 48);

        let mut decoded = vec![0u8; vertices.len()];
        decode_vertex_buffer(&mut decoded, 400, 48, &encoded).unwrap();
        assert_eq!(decoded, vertices);
    }

    #[test]
    fn bound_rejects_overflowing_count() {
        assert!(matches!(
            encode_vertex_buffer_bound(usize::MAX, 16),
            Err(CodecError::Wire(wire::WireError::BoundOverflow {
                vertex_count: usize::MAX,
                vertex_size: 16
            }))
        ));
        assert_eq!(
            encode_vertex_buffer_bound(1, 6),
            Err(CodecError::InvalidVertexSize { vertex_size: 6 })
        );
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut encoded = encode(&[1, 2, 3, 4, 5, 6, 7, 8], 4);
        encoded.push(0);
        let mut decoded = [0u8; 8];
        let err = decode_vertex_buffer(&mut decoded, 2, 4, &encoded).unwrap_err();
        assert_eq!(
            err,
            CodecError::TrailingData {
                expected: 32,
                found: 33
            }
        );
    }

    #[test]
    fn decode_rejects_bad_header() {
        let mut encoded = encode(&[1, 2, 3, 4], 4);
        encoded[0] = 0x01;
        let mut decoded = [0u8; 4];
        assert!(matches!(
            decode_vertex_buffer(&mut decoded, 1, 4, &encoded),
            Err(CodecError::Wire(wire::WireError::InvalidTag { found: 0x01 }))
        ));
    }

    #[test]
    fn decode_rejects_truncated_stream() {
        let vertices: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(37)).collect();
        let encoded = encode(&vertices, 4);
        let mut decoded = vec![0u8; vertices.len()];
        for cut in [0, 4, encoded.len() / 2, encoded.len() - 1] {
            assert!(
                decode_vertex_buffer(&mut decoded, 16, 4, &encoded[..cut]).is_err(),
                "cut at {cut} decoded"
            );
        }
    }

    #[test]
    fn decode_output_too_small() {
        let encoded = encode(&[0; 8], 4);
        let mut decoded = [0u8; 7];
        assert!(decode_vertex_buffer(&mut decoded, 2, 4, &encoded)
            .unwrap_err()
            .is_capacity_exhausted());
    }

    #[test]
    fn stats_cover_block_bytes() {
        let vertices: Vec<u8> = (0..100u32).flat_map(|i| (i * 31).to_le_bytes()).collect();
        let mut out = vec![0u8; encode_vertex_buffer_bound(100, 4).unwrap()];
        let mut stats = EncodeStats::new(4);
        let len = encode_vertex_buffer_with(
            &mut out,
            &vertices,
            100,
            4,
            &EncoderConfig::default(),
            &mut stats,
        )
        .unwrap();

        assert_eq!(stats.total_size, len);
        assert_eq!(stats.vertex_count, 100);
        assert_eq!(stats.block_bytes(), len - 1 - 32);
    }
}
