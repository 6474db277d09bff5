//! Byte-wide zigzag transform.

/// Maps a wrapping byte delta to an unsigned value that is small for small
/// positive and negative deltas.
///
/// `0 -> 0`, `-1 -> 1`, `1 -> 2`, `-2 -> 3`, ...
#[inline]
#[must_use]
pub const fn zigzag8(delta: u8) -> u8 {
    (((delta as i8) >> 7) as u8) ^ (delta << 1)
}

/// Inverse of [`zigzag8`].
#[inline]
#[must_use]
pub const fn unzigzag8(value: u8) -> u8 {
    (value >> 1) ^ (value & 1).wrapping_neg()
}
