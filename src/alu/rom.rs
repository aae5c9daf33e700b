//! ALU ROM construction and lookup.

use crate::alu::ops::{BinaryOp, UnaryOp, STANDARD_BINARY_OPS, STANDARD_UNARY_OPS};
use crate::nibble;

/// Size of the ALU ROM: one entry per (A, B, opcode) nibble triple.
pub const ALU_ROM_SIZE: usize = 0x1000;

/// Table index for operands `a`, `b` under `opcode`: `a | b << 4 | opcode << 8`.
#[inline]
pub const fn alu_key(a: u8, b: u8, opcode: u8) -> usize {
    nibble::pack(a, b, opcode, 0) as usize
}

/// Precompute every ALU result into a flat 4096-byte table.
///
/// Entry `alu_key(a, b, op)` holds `binary_ops[op](a, b)`. An
/// [`BinaryOp::Extended`] entry resolves through `unary_ops[b](a)`.
pub fn build_alu_rom(binary_ops: &[BinaryOp; 16], unary_ops: &[UnaryOp; 16]) -> [u8; ALU_ROM_SIZE] {
    let mut table = [0u8; ALU_ROM_SIZE];
    for opcode in 0..16u8 {
        let op = &binary_ops[opcode as usize];
        for b in 0..16u8 {
            for a in 0..16u8 {
                table[alu_key(a, b, opcode)] = op.eval(a, b, unary_ops);
            }
        }
    }
    table
}

/// An immutable ALU lookup table.
#[derive(Clone, PartialEq, Eq)]
pub struct AluRom {
    table: Box<[u8; ALU_ROM_SIZE]>,
}

impl AluRom {
    /// The table for the standard operation set.
    pub fn standard() -> Self {
        Self::from_table(build_alu_rom(&STANDARD_BINARY_OPS, &STANDARD_UNARY_OPS))
    }

    /// Wrap an already built table.
    pub fn from_table(table: [u8; ALU_ROM_SIZE]) -> Self {
        Self { table: Box::new(table) }
    }

    /// Load from a raw image, truncating or zero-padding it to 4096 bytes.
    ///
    /// `None` gives an all-zero ROM, under which every ALU read yields 0.
    pub fn from_image(image: Option<&[u8]>) -> Self {
        let mut table = Box::new([0u8; ALU_ROM_SIZE]);
        if let Some(bytes) = image {
            let len = bytes.len().min(ALU_ROM_SIZE);
            table[..len].copy_from_slice(&bytes[..len]);
        }
        Self { table }
    }

    /// Look up the result for `a`, `b` under `opcode`.
    #[inline]
    pub fn lookup(&self, a: u8, b: u8, opcode: u8) -> u8 {
        self.table[alu_key(a, b, opcode)]
    }

    /// The raw image, suitable for writing out with [`crate::image::save_image`].
    pub fn as_bytes(&self) -> &[u8] {
        &self.table[..]
    }
}

impl Default for AluRom {
    fn default() -> Self {
        Self::from_image(None)
    }
}

impl std::fmt::Debug for AluRom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let non_zero = self.table.iter().filter(|&&b| b != 0).count();
        f.debug_struct("AluRom")
            .field("non_zero_entries", &non_zero)
            .field("total_entries", &ALU_ROM_SIZE)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(alu_key(0, 0, 0), 0);
        assert_eq!(alu_key(1, 0, 0), 0x001);
        assert_eq!(alu_key(0, 1, 0), 0x010);
        assert_eq!(alu_key(0, 0, 1), 0x100);
        assert_eq!(alu_key(15, 15, 15), 0xfff);
    }

    #[test]
    fn test_add_entries() {
        let rom = AluRom::standard();
        for a in 0..16u8 {
            for b in 0..16u8 {
                assert_eq!(rom.lookup(a, b, 0), (a + b) & 0xf);
                assert_eq!(rom.lookup(a, b, 1), (a + b >= 16) as u8);
            }
        }
    }

    #[test]
    fn test_multiply_entries() {
        let rom = AluRom::standard();
        for a in 0..16u8 {
            for b in 0..16u8 {
                let product = a as u16 * b as u16;
                assert_eq!(rom.lookup(a, b, 2) as u16, product & 0xf);
                assert_eq!(rom.lookup(a, b, 3) as u16, product >> 4);
            }
        }
    }

    #[test]
    fn test_logic_entries() {
        let rom = AluRom::standard();
        for a in 0..16u8 {
            for b in 0..16u8 {
                assert_eq!(rom.lookup(a, b, 4), a & b);
                assert_eq!(rom.lookup(a, b, 5), a | b);
                assert_eq!(rom.lookup(a, b, 6), a ^ b);
            }
        }
    }

    #[test]
    fn test_unary_entries() {
        let rom = AluRom::standard();
        for a in 0..16u8 {
            assert_eq!(rom.lookup(a, 0, 15), (a == 0) as u8);
            assert_eq!(rom.lookup(a, 1, 15), !a & 0xf);
            for selector in 2..16u8 {
                assert_eq!(rom.lookup(a, selector, 15), 0);
            }
        }
    }

    #[test]
    fn test_every_entry_is_a_nibble() {
        let rom = AluRom::standard();
        assert!(rom.as_bytes().iter().all(|&b| b <= 0xf));
        assert_eq!(rom.as_bytes().len(), ALU_ROM_SIZE);
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build_alu_rom(&STANDARD_BINARY_OPS, &STANDARD_UNARY_OPS);
        let second = build_alu_rom(&STANDARD_BINARY_OPS, &STANDARD_UNARY_OPS);
        assert_eq!(first[..], second[..]);
    }

    #[test]
    fn test_custom_tables() {
        let mut binary = STANDARD_BINARY_OPS;
        binary[7] = BinaryOp::Apply(|a, b| a.wrapping_sub(b));
        let mut unary = STANDARD_UNARY_OPS;
        unary[2] = |a| a << 1;

        let rom = AluRom::from_table(build_alu_rom(&binary, &unary));
        assert_eq!(rom.lookup(3, 5, 7), 0xe);
        assert_eq!(rom.lookup(0b1001, 2, 15), 0b0010);
    }

    #[test]
    fn test_from_image_normalizes() {
        let short = AluRom::from_image(Some(&[1, 2, 3]));
        assert_eq!(&short.as_bytes()[..4], &[1, 2, 3, 0]);
        assert_eq!(short.as_bytes().len(), ALU_ROM_SIZE);

        let long = vec![7u8; ALU_ROM_SIZE + 100];
        let truncated = AluRom::from_image(Some(long.as_slice()));
        assert_eq!(truncated.as_bytes().len(), ALU_ROM_SIZE);
        assert!(truncated.as_bytes().iter().all(|&b| b == 7));

        assert!(AluRom::from_image(None).as_bytes().iter().all(|&b| b == 0));
    }
}
