//! Encoder configuration.

use wire::FormatByte;

use crate::error::CodecResult;

/// Settings for [`encode_vertex_buffer_with`](crate::encode_vertex_buffer_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Stream version stored in the low nibble of the format byte.
    pub version: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            version: wire::VERSION,
        }
    }
}

impl EncoderConfig {
    /// Creates a configuration writing `version`.
    #[must_use]
    pub const fn with_version(version: u8) -> Self {
        Self { version }
    }

    /// Returns the format byte for this configuration.
    pub fn format_byte(&self) -> CodecResult<FormatByte> {
        Ok(FormatByte::new(self.version)?)
    }
}
