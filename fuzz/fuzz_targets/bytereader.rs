#![no_main]

use bytestream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 5;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_u32_le();
            }
            2 => {
                let len = usize::from(data[idx.saturating_sub(1)] >> 3);
                let _ = reader.read_bytes(len);
            }
            3 => {
                let _ = reader.read_array::<16>();
            }
            _ => {
                let len = usize::from(data[idx.saturating_sub(1)]);
                let _ = reader.tail(len);
            }
        }
    }
});
