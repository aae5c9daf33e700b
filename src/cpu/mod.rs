//! CPU emulation.
//!
//! This module implements the whole machine:
//! - 16 nibble registers, four of which form a 16-bit address register
//! - 64 KiB of byte memory behind a pluggable write guard
//! - a single-byte move instruction whose special destinations run commands

pub mod memory;
pub mod registers;
pub mod decode;
pub mod execute;

pub use memory::{AllWritable, Memory, WriteGuard, MEMORY_SIZE};
pub use registers::{Reg, Registers};
pub use decode::{decode, encode, Command, Instruction};
pub use execute::{Cpu, CpuError, CpuState};
