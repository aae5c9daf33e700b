//! Instruction decoder.
//!
//! Every instruction is a single byte: the high nibble is the source
//! register, the low nibble the destination. Two destinations are special:
//! writing IMMEDIATE loads the source nibble itself as a constant, and
//! writing ALU_RESULT runs the command whose index is the source nibble.
//! All 256 byte values decode to something, so decoding cannot fail.

use crate::cpu::registers::Reg;
use crate::nibble;
use serde::{Deserialize, Serialize};

/// Side-effecting commands, triggered by a move into ALU_RESULT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// 0: MEM_LOW, MEM_HIGH := nibbles of memory[address]
    MemoryRead,
    /// 1: memory[address] := MEM_HIGH:MEM_LOW, if the guard allows it
    MemoryWrite,
    /// 2: address := address + 1
    IncrementAddress,
    /// 3: address := address - 1
    DecrementAddress,
    /// 4: pc := address
    Jump,
    /// 5: pc := address if CONTROL == 0
    JumpIf,
    /// 6: swap pc and address
    JumpLink,
    /// 7-13: reserved; carries its index so it re-encodes faithfully
    Noop(u8),
    /// 14: dump registers
    Break,
    /// 15: dump registers and memory, then stop
    Halt,
}

impl Command {
    /// The command selected by the low nibble of `index`.
    pub fn from_index(index: u8) -> Self {
        match nibble::low(index) {
            0x0 => Command::MemoryRead,
            0x1 => Command::MemoryWrite,
            0x2 => Command::IncrementAddress,
            0x3 => Command::DecrementAddress,
            0x4 => Command::Jump,
            0x5 => Command::JumpIf,
            0x6 => Command::JumpLink,
            0xE => Command::Break,
            0xF => Command::Halt,
            n => Command::Noop(n),
        }
    }

    /// The command index, i.e. the source nibble that selects it.
    pub fn index(self) -> u8 {
        match self {
            Command::MemoryRead => 0x0,
            Command::MemoryWrite => 0x1,
            Command::IncrementAddress => 0x2,
            Command::DecrementAddress => 0x3,
            Command::Jump => 0x4,
            Command::JumpIf => 0x5,
            Command::JumpLink => 0x6,
            Command::Noop(n) => n,
            Command::Break => 0xE,
            Command::Halt => 0xF,
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// IMMEDIATE := value
    LoadImmediate(u8),
    /// Run a command.
    Command(Command),
    /// dst := src, where reading ALU_RESULT performs an ALU lookup.
    Move { src: Reg, dst: Reg },
}

/// Decode one instruction byte.
pub fn decode(byte: u8) -> Instruction {
    let src = nibble::high(byte);
    match Reg::from_nibble(byte) {
        Reg::Immediate => Instruction::LoadImmediate(src),
        Reg::AluResult => Instruction::Command(Command::from_index(src)),
        dst => Instruction::Move {
            src: Reg::from_nibble(src),
            dst,
        },
    }
}

/// Encode an instruction back into its byte.
///
/// A `Move` whose destination is IMMEDIATE or ALU_RESULT would not decode
/// back to a move; it encodes to whatever that byte actually means.
pub fn encode(instr: &Instruction) -> u8 {
    match *instr {
        Instruction::LoadImmediate(value) => nibble::join(Reg::Immediate.id(), value),
        Instruction::Command(cmd) => nibble::join(Reg::AluResult.id(), cmd.index()),
        Instruction::Move { src, dst } => nibble::join(dst.id(), src.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_load_immediate() {
        assert_eq!(decode(0x00), Instruction::LoadImmediate(0));
        assert_eq!(decode(0xA0), Instruction::LoadImmediate(0xA));
    }

    #[test]
    fn test_decode_commands() {
        assert_eq!(decode(0x07), Instruction::Command(Command::MemoryRead));
        assert_eq!(decode(0x17), Instruction::Command(Command::MemoryWrite));
        assert_eq!(decode(0x67), Instruction::Command(Command::JumpLink));
        assert_eq!(decode(0x97), Instruction::Command(Command::Noop(9)));
        assert_eq!(decode(0xE7), Instruction::Command(Command::Break));
        assert_eq!(decode(0xF7), Instruction::Command(Command::Halt));
    }

    #[test]
    fn test_decode_moves() {
        // src is the high nibble, dst the low nibble
        assert_eq!(
            decode(0x05),
            Instruction::Move { src: Reg::Immediate, dst: Reg::AluB }
        );
        assert_eq!(
            decode(0x7C),
            Instruction::Move { src: Reg::AluResult, dst: Reg::A }
        );
        assert_eq!(
            decode(0xFF),
            Instruction::Move { src: Reg::D, dst: Reg::D }
        );
    }

    #[test]
    fn test_every_byte_reencodes() {
        for byte in 0..=255u8 {
            assert_eq!(encode(&decode(byte)), byte, "byte 0x{:02X}", byte);
        }
    }

    #[test]
    fn test_command_indices() {
        for index in 0..16u8 {
            assert_eq!(Command::from_index(index).index(), index);
        }
    }
}
