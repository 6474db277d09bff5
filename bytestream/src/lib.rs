//! Bounded byte cursors for the vtxc vertex codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for byte-level encoding and decoding
//! over caller-provided buffers.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Cursor arithmetic is replaced by checked offsets.
//! - **Bounded operations** - All reads/writes are bounds-checked before touching memory.
//! - **No partial writes** - A write that does not fit fails without writing anything.
//! - **No domain knowledge** - This crate knows nothing about vertices, groups, or blocks.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut buf = [0u8; 8];
//! let mut writer = ByteWriter::new(&mut buf);
//! writer.write_u8(0xA1).unwrap();
//! writer.write_u32_le(42).unwrap();
//! let used = writer.finish();
//!
//! let mut reader = ByteReader::new(&buf[..used]);
//! assert_eq!(reader.read_u8().unwrap(), 0xA1);
//! assert_eq!(reader.read_u32_le().unwrap(), 42);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
