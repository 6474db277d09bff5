//! Vertex buffer compression for the vtxc codec.
//!
//! This is the main codec crate that ties together bytestream and wire to
//! encode arrays of fixed-size vertices into a compact byte stream and back.
//!
//! # Features
//!
//! - Per-channel delta prediction with zigzag folding
//! - Adaptive 1/2/4/8-bit group packing with sentinel escapes
//! - A bit-plane transposition format for comparison
//! - Optional per-channel statistics through [`StatsSink`]
//!
//! # Design Principles
//!
//! - **Caller-provided buffers** - No allocation on the encode or decode path.
//! - **Deterministic** - Same inputs produce the same bytes.
//! - **Explicit failures** - Capacity exhaustion and contract violations are
//!   distinct [`CodecError`] variants.
//!
//! # Example
//!
//! ```
//! use codec::{decode_vertex_buffer, encode_vertex_buffer, encode_vertex_buffer_bound};
//!
//! let vertices: Vec<u8> = (0..64u32).flat_map(|i| (i * 3).to_le_bytes()).collect();
//! let mut encoded = vec![0u8; encode_vertex_buffer_bound(64, 4).unwrap()];
//! let len = encode_vertex_buffer(&mut encoded, &vertices, 64, 4).unwrap();
//!
//! let mut decoded = vec![0u8; vertices.len()];
//! decode_vertex_buffer(&mut decoded, 64, 4, &encoded[..len]).unwrap();
//! assert_eq!(decoded, vertices);
//! ```

mod bitplane;
mod block;
mod bytes;
mod config;
mod error;
mod group;
mod stats;
mod stream;
mod zigzag;

pub use bitplane::{decode_bitplane, encode_bitplane, encode_bitplane_bound, transpose};
pub use block::{decode_vertex_block, encode_vertex_block, Predictor};
pub use bytes::{decode_bytes, encode_bytes, select_group_width};
pub use config::EncoderConfig;
pub use error::{CodecError, CodecResult};
pub use group::{decode_group, encode_group, ByteGroup, GroupBuffer};
pub use stats::{ChannelStats, EncodeStats, NoStats, StatsSink};
pub use stream::{
    decode_vertex_buffer, encode_vertex_buffer, encode_vertex_buffer_bound,
    encode_vertex_buffer_with,
};
pub use wire::{FormatByte, GroupWidth};
pub use zigzag::{unzigzag8, zigzag8};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = EncoderConfig::default();
        let _ = EncodeStats::new(4);
        let _ = NoStats;
        let _ = GroupWidth::Bits8;
        let _ = FormatByte::default();

        // Error types
        let _: CodecResult<()> = Ok(());
    }

    #[test]
    fn bounds_reexported() {
        assert_eq!(encode_vertex_buffer_bound(0, 4).unwrap(), 1 + 32);
        assert_eq!(encode_bitplane_bound(33, 8).unwrap(), 2 * 2 * 33 * 4);
    }

    #[test]
    fn zigzag_usage() {
        assert_eq!(zigzag8(0xFF), 1);
        assert_eq!(unzigzag8(1), 0xFF);
    }
}
