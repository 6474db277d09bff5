#![no_main]

use codec::{decode_bitplane, decode_vertex_buffer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let vertex_size = (usize::from(data[0] % 64) + 1) * 4;
    let vertex_count = usize::from(data[1]) * 3;
    let encoded = &data[2..];

    let mut out = vec![0u8; vertex_count * vertex_size];
    let _ = decode_vertex_buffer(&mut out, vertex_count, vertex_size, encoded);
    let _ = decode_bitplane(&mut out, vertex_count, vertex_size, encoded);
});
