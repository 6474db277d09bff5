//! Per-group bit width selectors.

/// Bit width chosen for one byte group.
///
/// Stored as a 2-bit code, four selectors per header byte, low-order slot first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum GroupWidth {
    /// All sixteen values are zero; no payload.
    Bits1 = 0,
    /// Two bits per value with escapes.
    Bits2 = 1,
    /// Four bits per value with escapes.
    Bits4 = 2,
    /// Verbatim bytes.
    Bits8 = 3,
}

impl GroupWidth {
    /// All widths in code order.
    pub const ALL: [Self; 4] = [Self::Bits1, Self::Bits2, Self::Bits4, Self::Bits8];

    /// Returns the 2-bit selector code (log2 of the width).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the number of bits per value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        1 << self.code()
    }

    /// Builds a width from the low two bits of `code`.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 3 {
            0 => Self::Bits1,
            1 => Self::Bits2,
            2 => Self::Bits4,
            _ => Self::Bits8,
        }
    }

    /// Returns the header byte index and the bits to OR in for group `group`.
    #[must_use]
    pub const fn header_slot(self, group: usize) -> (usize, u8) {
        (group / 4, self.code() << ((group % 4) * 2))
    }

    /// Reads the selector for group `group` from a header byte slice.
    ///
    /// Returns `None` if the header is too short.
    #[must_use]
    pub fn read(header: &[u8], group: usize) -> Option<Self> {
        let byte = *header.get(group / 4)?;
        Some(Self::from_code(byte >> ((group % 4) * 2)))
    }
}
