#![no_main]

use codec::{
    decode_bitplane, decode_vertex_buffer, encode_bitplane, encode_bitplane_bound,
    encode_vertex_buffer, encode_vertex_buffer_bound,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, vertices)) = data.split_first() else {
        return;
    };
    // 4..=256 in steps of 4.
    let vertex_size = (usize::from(selector % 64) + 1) * 4;
    let vertex_count = vertices.len() / vertex_size;

    let mut encoded = vec![0u8; encode_vertex_buffer_bound(vertex_count, vertex_size).unwrap()];
    let len = encode_vertex_buffer(&mut encoded, vertices, vertex_count, vertex_size)
        .expect("bound must fit");
    let mut decoded = vec![0u8; vertex_count * vertex_size];
    decode_vertex_buffer(&mut decoded, vertex_count, vertex_size, &encoded[..len])
        .expect("own stream must decode");
    assert_eq!(decoded, vertices[..decoded.len()]);

    let mut encoded = vec![0u8; encode_bitplane_bound(vertex_count, vertex_size).unwrap()];
    let len = encode_bitplane(&mut encoded, vertices, vertex_count, vertex_size)
        .expect("bound must fit");
    decode_bitplane(&mut decoded, vertex_count, vertex_size, &encoded[..len])
        .expect("own stream must decode");
    assert_eq!(decoded, vertices[..decoded.len()]);
});
