//! Bounded byte writer over a caller-provided buffer.

use crate::error::{ByteError, ByteResult};

/// A byte writer bounded by the length of its destination slice.
///
/// Every write checks the remaining capacity first. A write that does not fit
/// returns [`ByteError::Overflow`] and leaves both the buffer and the cursor
/// untouched, so the bytes before [`position`](Self::position) are always a
/// valid prefix.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a writer positioned at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the total capacity of the destination in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Checks that at least `bytes` more bytes fit without writing anything.
    pub fn ensure(&self, bytes: usize) -> ByteResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(ByteError::Overflow {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> ByteResult<()> {
        self.ensure(1)?;
        self.buf[self.pos] = value;
        self.pos += 1;
        Ok(())
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32_le(&mut self, value: u32) -> ByteResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a slice verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Writes `count` zero bytes.
    pub fn write_zeros(&mut self, count: usize) -> ByteResult<()> {
        self.ensure(count)?;
        self.buf[self.pos..self.pos + count].fill(0);
        self.pos += count;
        Ok(())
    }

    /// Reserves `count` zeroed bytes and returns the offset of the region.
    ///
    /// The region can later be filled in with [`or_at`](Self::or_at).
    pub fn reserve_zeroed(&mut self, count: usize) -> ByteResult<usize> {
        let offset = self.pos;
        self.write_zeros(count)?;
        Ok(offset)
    }

    /// ORs `bits` into an already written byte.
    pub fn or_at(&mut self, offset: usize, bits: u8) -> ByteResult<()> {
        if offset >= self.pos {
            return Err(ByteError::InvalidOffset {
                offset,
                written: self.pos,
            });
        }
        self.buf[offset] |= bits;
        Ok(())
    }

    /// Finishes writing and returns the number of bytes written.
    pub fn finish(self) -> usize {
        self.pos
    }
}
