use bytestream::ByteWriter;
use codec::{
    decode_vertex_buffer, encode_vertex_block, encode_vertex_buffer, encode_vertex_buffer_bound,
    encode_vertex_buffer_with, CodecError, EncodeStats, EncoderConfig, GroupWidth, NoStats,
    Predictor,
};

fn noise(len: usize, mut state: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn encode(vertices: &[u8], vertex_size: usize) -> Vec<u8> {
    let count = vertices.len() / vertex_size;
    let mut out = vec![0u8; encode_vertex_buffer_bound(count, vertex_size).unwrap()];
    let len = encode_vertex_buffer(&mut out, vertices, count, vertex_size).unwrap();
    out.truncate(len);
    out
}

fn roundtrip(vertices: &[u8], vertex_size: usize) {
    let count = vertices.len() / vertex_size;
    let encoded = encode(vertices, vertex_size);
    let mut decoded = vec![0u8; vertices.len()];
    decode_vertex_buffer(&mut decoded, count, vertex_size, &encoded).unwrap();
    assert_eq!(decoded, vertices, "vertex_size {vertex_size}, count {count}");
}

#[test]
fn integration_four_vertex_stream_layout() {
    let vertices = [0u8, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 255, 0, 0, 0];
    let encoded = encode(&vertices, 4);

    let mut expected = vec![0xA1];
    // channel 0: zigzag 0,2,2,5 at 2 bits with one escape
    expected.extend([0x01, 0x2B, 0x00, 0x00, 0x00, 0x05]);
    // channels 1..3: all zero, 1-bit width, header only
    expected.extend([0x00, 0x00, 0x00]);
    expected.extend([0u8; 28]);
    expected.extend([0, 0, 0, 0]);
    assert_eq!(encoded, expected);

    assert_ne!(GroupWidth::from_code(encoded[1]), GroupWidth::Bits1);
    for header in &encoded[7..10] {
        assert_eq!(GroupWidth::from_code(*header), GroupWidth::Bits1);
    }

    let mut decoded = [0u8; 16];
    decode_vertex_buffer(&mut decoded, 4, 4, &encoded).unwrap();
    assert_eq!(decoded, vertices);
}

#[test]
fn integration_tail_pads_small_vertices() {
    let vertices: Vec<u8> = (1..=16u8).collect();
    let encoded = encode(&vertices, 8);
    let tail = &encoded[encoded.len() - 32..];
    assert!(tail[..24].iter().all(|&b| b == 0));
    assert_eq!(&tail[24..], &vertices[..8]);
}

#[test]
fn integration_tail_is_first_vertex_for_large_vertices() {
    let vertices = noise(48 * 5, 7);
    let encoded = encode(&vertices, 48);
    assert_eq!(&encoded[encoded.len() - 48..], &vertices[..48]);
}

#[test]
fn integration_capacity_threshold_is_monotonic() {
    let vertices = noise(4 * 40, 11);
    let reference = encode(&vertices, 4);
    let bound = encode_vertex_buffer_bound(40, 4).unwrap();

    for capacity in 0..=bound {
        let mut out = vec![0u8; capacity];
        match encode_vertex_buffer(&mut out, &vertices, 40, 4) {
            Ok(len) => {
                assert!(capacity >= reference.len(), "capacity {capacity} fit");
                assert_eq!(&out[..len], &reference[..], "capacity {capacity}");
            }
            Err(err) => {
                assert!(capacity < reference.len(), "capacity {capacity}: {err}");
                assert!(err.is_capacity_exhausted(), "capacity {capacity}: {err}");
            }
        }
    }
}

#[test]
fn integration_bound_fits_incompressible_input() {
    for vertex_size in [4, 12, 16, 32, 36, 64, 128, 256] {
        for count in [1, 15, 16, 17, 255, 256, 257, 600] {
            let vertices = noise(vertex_size * count, (vertex_size * 31 + count) as u32 | 1);
            let bound = encode_vertex_buffer_bound(count, vertex_size).unwrap();
            let mut out = vec![0u8; bound];
            let len = encode_vertex_buffer(&mut out, &vertices, count, vertex_size).unwrap();
            assert!(len <= bound);
        }
    }
}

#[test]
fn integration_roundtrip_mixed_sizes() {
    for vertex_size in [4, 8, 20, 48, 256] {
        for count in [0, 1, 17, 256, 257, 513] {
            roundtrip(&noise(vertex_size * count, 0x5EED + count as u32), vertex_size);
        }
    }
}

#[test]
fn integration_smooth_data_compresses() {
    let vertices: Vec<u8> = (0..1000u32)
        .flat_map(|i| [i, 2 * i, 500].map(u32::to_le_bytes))
        .flatten()
        .collect();
    let encoded = encode(&vertices, 12);
    assert!(encoded.len() * 3 < vertices.len());
    roundtrip(&vertices, 12);
}

#[test]
fn integration_blocks_share_one_predictor() {
    // 16-byte vertices -> 256 vertices per block, 2 blocks
    let vertices = noise(16 * 300, 3);
    let stream = encode(&vertices, 16);

    let mut manual = vec![0u8; stream.len()];
    let mut writer = ByteWriter::new(&mut manual);
    writer.write_u8(0xA1).unwrap();
    let mut predictor = Predictor::new(&vertices[..16]).unwrap();
    let (first, second) = vertices.split_at(256 * 16);
    encode_vertex_block(first, &mut predictor, &mut writer, &mut NoStats).unwrap();
    encode_vertex_block(second, &mut predictor, &mut writer, &mut NoStats).unwrap();
    writer.write_zeros(16).unwrap();
    writer.write_bytes(&vertices[..16]).unwrap();
    let len = writer.finish();

    assert_eq!(&manual[..len], &stream[..]);
}

#[test]
fn integration_decode_rejects_wrong_vertex_count() {
    // constant vertices: every channel is header bytes only
    let vertices = vec![0u8; 4 * 80];
    let encoded = encode(&vertices, 4);
    assert_eq!(encoded.len(), 1 + 4 * 2 + 32);

    let mut fewer = vec![0u8; 4 * 20];
    assert_eq!(
        decode_vertex_buffer(&mut fewer, 20, 4, &encoded),
        Err(CodecError::TrailingData {
            expected: 32,
            found: 36
        })
    );

    let mut more = vec![0u8; 4 * 160];
    assert_eq!(
        decode_vertex_buffer(&mut more, 160, 4, &encoded),
        Err(CodecError::TrailingData {
            expected: 32,
            found: 28
        })
    );
}

#[test]
fn integration_stats_match_stream() {
    let vertices = noise(8 * 500, 9);
    let mut out = vec![0u8; encode_vertex_buffer_bound(500, 8).unwrap()];
    let mut stats = EncodeStats::new(8);
    let len = encode_vertex_buffer_with(
        &mut out,
        &vertices,
        500,
        8,
        &EncoderConfig::default(),
        &mut stats,
    )
    .unwrap();

    assert_eq!(stats.total_size, len);
    assert_eq!(stats.block_bytes() + 1 + 32, len);
    for channel in &stats.channels {
        assert_eq!(channel.counted_bytes(), channel.size);
        // 500 vertices in 2 blocks: 16 + 16 groups
        assert_eq!(channel.group_counts.iter().sum::<usize>(), 32);
    }
}
