//! # Nibble Emulator
//!
//! A cycle-accurate emulator of a tiny 4-bit CPU.
//!
//! The machine has sixteen nibble registers and a single instruction: a
//! one-byte move from one register to another. Moving into the ALU result
//! register runs one of sixteen commands instead (memory access, address
//! arithmetic, jumps, debug traps), and reading from it looks up a
//! precomputed ALU ROM. The [`alu`] module builds that ROM; the [`cpu`]
//! module runs programs against it.

pub mod nibble;
pub mod alu;
pub mod cpu;
pub mod dump;
pub mod image;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use alu::{build_alu_rom, AluRom, ALU_ROM_SIZE};
pub use cpu::{decode, encode, AllWritable, Command, Cpu, CpuError, CpuState, Instruction, Memory, Reg, Registers, WriteGuard, MEMORY_SIZE};
pub use dump::{hexdump, DumpSink, HexDumpSink, NullSink};
pub use image::{load_image, save_image, ImageError};
