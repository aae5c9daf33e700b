//! ALU operation tables.
//!
//! Opcodes 0-14 are ordinary binary operations on two nibbles. Opcode 15 is
//! the extension slot: it ignores the binary table and instead uses operand
//! B as a selector into a second table of 16 unary operations applied to A.

use crate::nibble;

/// A unary ALU operation on a nibble.
pub type UnaryOp = fn(u8) -> u8;

/// One entry of the binary operation table.
#[derive(Clone, Copy)]
pub enum BinaryOp {
    /// Compute `f(a, b)`.
    Apply(fn(u8, u8) -> u8),
    /// Dispatch to `unary_ops[b](a)`.
    Extended,
}

impl BinaryOp {
    /// Evaluate this entry, consulting `unary` for the extension slot.
    ///
    /// Operands and result are all nibbles; the result is masked.
    #[inline]
    pub fn eval(&self, a: u8, b: u8, unary: &[UnaryOp; 16]) -> u8 {
        let (a, b) = (nibble::low(a), nibble::low(b));
        let result = match self {
            BinaryOp::Apply(f) => f(a, b),
            BinaryOp::Extended => unary[b as usize](a),
        };
        nibble::low(result)
    }
}

impl std::fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Apply(_) => write!(f, "Apply(..)"),
            BinaryOp::Extended => write!(f, "Extended"),
        }
    }
}

fn add_low(a: u8, b: u8) -> u8 {
    nibble::low(a + b)
}

fn add_carry(a: u8, b: u8) -> u8 {
    nibble::high(a + b)
}

fn mul_low(a: u8, b: u8) -> u8 {
    nibble::low(a * b)
}

fn mul_high(a: u8, b: u8) -> u8 {
    nibble::high(a * b)
}

fn and(a: u8, b: u8) -> u8 {
    a & b
}

fn or(a: u8, b: u8) -> u8 {
    a | b
}

fn xor(a: u8, b: u8) -> u8 {
    a ^ b
}

fn zero2(_: u8, _: u8) -> u8 {
    0
}

fn logical_not(a: u8) -> u8 {
    (a == 0) as u8
}

fn complement(a: u8) -> u8 {
    nibble::low(!a)
}

fn zero1(_: u8) -> u8 {
    0
}

/// The standard binary operations, indexed by opcode.
///
/// | op | result |
/// |----|--------|
/// | 0  | low nibble of `a + b` |
/// | 1  | carry out of `a + b` |
/// | 2  | low nibble of `a * b` |
/// | 3  | high nibble of `a * b` |
/// | 4  | `a & b` |
/// | 5  | `a \| b` |
/// | 6  | `a ^ b` |
/// | 7-14 | reserved, 0 |
/// | 15 | `unary[b](a)` |
pub const STANDARD_BINARY_OPS: [BinaryOp; 16] = [
    BinaryOp::Apply(add_low),
    BinaryOp::Apply(add_carry),
    BinaryOp::Apply(mul_low),
    BinaryOp::Apply(mul_high),
    BinaryOp::Apply(and),
    BinaryOp::Apply(or),
    BinaryOp::Apply(xor),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Apply(zero2),
    BinaryOp::Extended,
];

/// The standard unary operations, selected by operand B under opcode 15.
///
/// Unary 0 is logical NOT (1 iff `a == 0`), unary 1 is the bitwise
/// complement of `a` within a nibble. The rest are reserved and yield 0.
pub const STANDARD_UNARY_OPS: [UnaryOp; 16] = [
    logical_not,
    complement,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
    zero1,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: usize, a: u8, b: u8) -> u8 {
        STANDARD_BINARY_OPS[op].eval(a, b, &STANDARD_UNARY_OPS)
    }

    #[test]
    fn test_add_carry() {
        assert_eq!(eval(0, 9, 9), 2);
        assert_eq!(eval(1, 9, 9), 1);
        assert_eq!(eval(1, 7, 8), 0);
        assert_eq!(eval(1, 15, 15), 1);
    }

    #[test]
    fn test_multiply() {
        // 15 * 15 = 225 = 0xE1
        assert_eq!(eval(2, 15, 15), 0x1);
        assert_eq!(eval(3, 15, 15), 0xE);
    }

    #[test]
    fn test_reserved_are_zero() {
        for op in 7..15 {
            assert_eq!(eval(op, 15, 15), 0, "opcode {}", op);
        }
    }

    #[test]
    fn test_extension_slot() {
        assert_eq!(eval(15, 0, 0), 1);
        assert_eq!(eval(15, 5, 0), 0);
        assert_eq!(eval(15, 0b1010, 1), 0b0101);
        assert_eq!(eval(15, 7, 2), 0);
    }

    #[test]
    fn test_eval_masks_result() {
        let wide = BinaryOp::Apply(|_, _| 0xff);
        assert_eq!(wide.eval(0, 0, &STANDARD_UNARY_OPS), 0xf);
    }
}
