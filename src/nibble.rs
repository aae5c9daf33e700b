//! Nibble primitives.
//!
//! Everything on this machine is built out of 4-bit values: registers hold
//! one nibble, bytes split into a low and a high nibble, and both the address
//! register and the ALU ROM key are formed by packing nibbles low to high.

/// Mask selecting the low four bits of a byte.
pub const NIBBLE_MASK: u8 = 0x0f;

/// Low nibble of a byte (bits 0-3).
#[inline]
pub const fn low(byte: u8) -> u8 {
    byte & NIBBLE_MASK
}

/// High nibble of a byte (bits 4-7), shifted down.
#[inline]
pub const fn high(byte: u8) -> u8 {
    (byte >> 4) & NIBBLE_MASK
}

/// Join two nibbles into a byte, `lo` in bits 0-3 and `hi` in bits 4-7.
#[inline]
pub const fn join(lo: u8, hi: u8) -> u8 {
    low(lo) | (low(hi) << 4)
}

/// Pack up to four nibbles into a 16-bit value, least significant first.
///
/// Each input is masked to 4 bits before packing, so stray high bits can
/// never leak into a neighbouring nibble.
#[inline]
pub const fn pack(n0: u8, n1: u8, n2: u8, n3: u8) -> u16 {
    (low(n0) as u16)
        | ((low(n1) as u16) << 4)
        | ((low(n2) as u16) << 8)
        | ((low(n3) as u16) << 12)
}

/// Split a 16-bit value into its four nibbles, least significant first.
#[inline]
pub const fn unpack(value: u16) -> [u8; 4] {
    [
        (value & 0xf) as u8,
        ((value >> 4) & 0xf) as u8,
        ((value >> 8) & 0xf) as u8,
        ((value >> 12) & 0xf) as u8,
    ]
}
