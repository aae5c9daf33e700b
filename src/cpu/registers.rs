//! The nibble register file.
//!
//! Sixteen 4-bit slots, each with a fixed role:
//!
//! | id | role | id | role |
//! |----|------|----|------|
//! | 0 | immediate | 8 | address bits 0-3 |
//! | 1 | control (jump condition) | 9 | address bits 4-7 |
//! | 2 | memory low nibble | A | address bits 8-11 |
//! | 3 | memory high nibble | B | address bits 12-15 |
//! | 4 | ALU operand A | C | general purpose |
//! | 5 | ALU operand B | D | general purpose |
//! | 6 | ALU opcode | E | general purpose |
//! | 7 | ALU result | F | general purpose |
//!
//! Slot 7 is never read as storage: reading ALU_RESULT is a ROM lookup, and
//! writing it triggers a command. Both are handled by the CPU, not here.

use crate::nibble;
use serde::{Deserialize, Serialize};

/// Register identifiers, one per nibble of the instruction encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Reg {
    Immediate = 0x0,
    Control = 0x1,
    MemLow = 0x2,
    MemHigh = 0x3,
    AluA = 0x4,
    AluB = 0x5,
    AluOp = 0x6,
    AluResult = 0x7,
    Addr0 = 0x8,
    Addr1 = 0x9,
    Addr2 = 0xA,
    Addr3 = 0xB,
    A = 0xC,
    B = 0xD,
    C = 0xE,
    D = 0xF,
}

impl Reg {
    /// All registers in id order.
    pub const ALL: [Reg; 16] = [
        Reg::Immediate,
        Reg::Control,
        Reg::MemLow,
        Reg::MemHigh,
        Reg::AluA,
        Reg::AluB,
        Reg::AluOp,
        Reg::AluResult,
        Reg::Addr0,
        Reg::Addr1,
        Reg::Addr2,
        Reg::Addr3,
        Reg::A,
        Reg::B,
        Reg::C,
        Reg::D,
    ];

    /// The register named by the low nibble of `value`.
    #[inline]
    pub const fn from_nibble(value: u8) -> Self {
        Self::ALL[nibble::low(value) as usize]
    }

    /// The register id as a nibble.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// The register file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    slots: [u8; 16],
}

impl Registers {
    /// Create a register file with every slot zeroed.
    pub fn new() -> Self {
        Self { slots: [0; 16] }
    }

    /// Zero every slot.
    pub fn reset(&mut self) {
        self.slots = [0; 16];
    }

    /// Read the stored nibble of `reg`.
    #[inline]
    pub fn get(&self, reg: Reg) -> u8 {
        self.slots[reg as usize]
    }

    /// Store `value` into `reg`, keeping only its low 4 bits.
    #[inline]
    pub fn set(&mut self, reg: Reg, value: u8) {
        self.slots[reg as usize] = nibble::low(value);
    }

    /// The 16-bit address register, gathered from ADDR_0..ADDR_3.
    pub fn address(&self) -> u16 {
        nibble::pack(
            self.get(Reg::Addr0),
            self.get(Reg::Addr1),
            self.get(Reg::Addr2),
            self.get(Reg::Addr3),
        )
    }

    /// Scatter a 16-bit address over ADDR_0..ADDR_3.
    pub fn set_address(&mut self, address: u16) {
        let [n0, n1, n2, n3] = nibble::unpack(address);
        self.set(Reg::Addr0, n0);
        self.set(Reg::Addr1, n1);
        self.set(Reg::Addr2, n2);
        self.set(Reg::Addr3, n3);
    }

    /// The raw register file, slot `i` holding register id `i`.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.slots
    }
}
