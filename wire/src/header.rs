//! Stream format byte.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{WireError, WireResult};

/// Tag carried in the high nibble of the first stream byte.
///
/// This value is fixed and must never change across versions.
pub const FORMAT_TAG: u8 = 0xA0;

/// Current stream version written by default.
pub const VERSION: u8 = 1;

/// Largest version the format byte can carry.
pub const MAX_VERSION: u8 = 0x0F;

/// Highest version the decoder understands.
///
/// Versions 0 and 1 share the same block layout.
pub const MAX_DECODE_VERSION: u8 = 1;

/// The first byte of a vertex stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatByte {
    version: u8,
}

impl FormatByte {
    /// Creates a format byte for `version`.
    pub const fn new(version: u8) -> WireResult<Self> {
        if version > MAX_VERSION {
            return Err(WireError::InvalidVersion { version });
        }
        Ok(Self { version })
    }

    /// Returns the stream version.
    #[must_use]
    pub const fn version(self) -> u8 {
        self.version
    }

    /// Returns the raw byte value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        FORMAT_TAG | self.version
    }

    /// Parses a raw byte, checking the tag and the decodable version range.
    pub const fn parse(raw: u8) -> WireResult<Self> {
        if raw & 0xF0 != FORMAT_TAG {
            return Err(WireError::InvalidTag { found: raw });
        }
        let version = raw & 0x0F;
        if version > MAX_DECODE_VERSION {
            return Err(WireError::UnsupportedVersion { found: version });
        }
        Ok(Self { version })
    }
}

impl Default for FormatByte {
    fn default() -> Self {
        Self { version: VERSION }
    }
}

/// Writes the format byte.
pub fn write_format_byte(format: FormatByte, writer: &mut ByteWriter<'_>) -> WireResult<()> {
    writer.write_u8(format.raw())?;
    Ok(())
}

/// Reads and validates the format byte.
pub fn read_format_byte(reader: &mut ByteReader<'_>) -> WireResult<FormatByte> {
    let raw = reader.read_u8()?;
    FormatByte::parse(raw)
}
