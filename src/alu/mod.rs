//! The ROM-driven ALU.
//!
//! The CPU has no arithmetic hardware of its own. Every ALU result is read
//! out of a 4096-entry table keyed by the three nibbles in the ALU_A, ALU_B
//! and ALU_OP registers. This module defines the operations and builds
//! that table:
//! - [`ops`] - the standard binary and unary operation sets
//! - [`rom`] - [`build_alu_rom`] and the [`AluRom`] image type

pub mod ops;
pub mod rom;

pub use ops::{BinaryOp, UnaryOp, STANDARD_BINARY_OPS, STANDARD_UNARY_OPS};
pub use rom::{alu_key, build_alu_rom, AluRom, ALU_ROM_SIZE};
