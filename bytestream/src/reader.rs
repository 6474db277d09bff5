//! Byte reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A byte reader over a borrowed slice.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Checks that at least `bytes` more bytes can be read.
    pub const fn ensure(&self, bytes: usize) -> ByteResult<()> {
        if bytes > self.remaining() {
            return Err(ByteError::UnexpectedEof {
                requested: bytes,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        self.ensure(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> ByteResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads `len` bytes and returns them as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Returns the last `len` bytes of the underlying slice without moving the cursor.
    pub const fn tail(&self, len: usize) -> ByteResult<&'a [u8]> {
        if len > self.data.len() {
            return Err(ByteError::UnexpectedEof {
                requested: len,
                available: self.data.len(),
            });
        }
        let (_, tail) = self.data.split_at(self.data.len() - len);
        Ok(tail)
    }
}
