//! Stream framing and block layout for the vtxc vertex codec.
//!
//! This crate handles the binary layout of an encoded vertex stream: the
//! format byte, the block sizing rule, group selector packing, the tail, and
//! the capacity bound. It does not know how groups are compressed.
//!
//! ```text
//! byte 0:  0xA0 | version
//! blocks:  per block, per channel: selector header bytes, group payloads
//! tail:    zero padding up to 32 bytes, then the first vertex
//! ```
//!
//! # Design Principles
//!
//! - **Stable wire format** - The layout is versioned and never self-describing
//!   beyond the format byte; both sides derive block sizes from the vertex size.
//! - **Bounded over-read** - The tail guarantees 32 readable bytes after the last block.

mod error;
mod header;
mod layout;
mod selector;

pub use error::{WireError, WireResult};
pub use header::{
    read_format_byte, write_format_byte, FormatByte, FORMAT_TAG, MAX_DECODE_VERSION, MAX_VERSION,
    VERSION,
};
pub use layout::{
    encode_bound, group_header_size, padded_group_len, read_tail_vertex, tail_size,
    validate_vertex_size, vertex_block_size, write_tail, BLOCK_MAX_VERTICES, BLOCK_SIZE_BYTES,
    BYTE_GROUP_DECODE_LIMIT, BYTE_GROUP_SIZE, MAX_VERTEX_SIZE, TAIL_MIN_SIZE,
};
pub use selector::GroupWidth;
