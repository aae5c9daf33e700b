//! CPU execution engine.
//!
//! Implements the fetch-decode-execute cycle and all sixteen commands.

use crate::alu::AluRom;
use crate::cpu::decode::{self, Command, Instruction};
use crate::cpu::memory::{AllWritable, Memory, WriteGuard};
use crate::cpu::registers::{Reg, Registers};
use crate::dump::DumpSink;
use crate::nibble;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CPU execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuState {
    /// CPU is running normally.
    Running,
    /// CPU has executed the halt command.
    Halted,
}

/// The CPU.
///
/// Generic over the [`WriteGuard`] consulted by the memory-write command.
pub struct Cpu<G: WriteGuard = AllWritable> {
    /// Register file.
    pub regs: Registers,
    /// Main memory.
    pub mem: Memory,
    /// ALU lookup table.
    alu: AluRom,
    /// Program counter.
    pc: u16,
    /// Current execution state.
    pub state: CpuState,
    /// Instructions executed so far.
    pub cycles: u64,
    guard: G,
}

impl Cpu {
    /// Create a CPU from optional ALU ROM and memory images.
    ///
    /// Both images are truncated or zero-padded to size; a missing image is
    /// all zeros.
    pub fn new(alu_rom: Option<&[u8]>, memory: Option<&[u8]>) -> Self {
        Self::with_guard(alu_rom, memory, AllWritable)
    }

    /// Create a CPU around an already built ALU ROM.
    pub fn with_alu(alu: AluRom, memory: Option<&[u8]>) -> Self {
        Self::from_parts(alu, Memory::from_image(memory), AllWritable)
    }
}

impl<G: WriteGuard> Cpu<G> {
    /// Like [`Cpu::new`], with a custom write guard.
    pub fn with_guard(alu_rom: Option<&[u8]>, memory: Option<&[u8]>, guard: G) -> Self {
        Self::from_parts(AluRom::from_image(alu_rom), Memory::from_image(memory), guard)
    }

    fn from_parts(alu: AluRom, mem: Memory, guard: G) -> Self {
        Self {
            regs: Registers::new(),
            mem,
            alu,
            pc: 0,
            state: CpuState::Running,
            cycles: 0,
            guard,
        }
    }

    /// Zero the registers and pc and resume running. Memory and the ALU ROM
    /// are kept as they are.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.pc = 0;
        self.state = CpuState::Running;
        self.cycles = 0;
    }

    /// Execute a single instruction.
    ///
    /// Returns the instruction that was executed. Break and halt hand their
    /// dumps to `sink`.
    pub fn step<S: DumpSink + ?Sized>(&mut self, sink: &mut S) -> Result<Instruction, CpuError> {
        if self.state != CpuState::Running {
            return Err(CpuError::NotRunning(self.state));
        }

        // Fetch
        let at = self.pc;
        let byte = self.mem.read(at);
        self.pc = self.pc.wrapping_add(1);

        // Decode
        let instr = decode::decode(byte);
        trace!("{:04X}: {:02X} {:?}", at, byte, instr);

        // Execute
        self.cycles += 1;
        match instr {
            Instruction::LoadImmediate(value) => self.regs.set(Reg::Immediate, value),
            Instruction::Command(cmd) => self.execute(cmd, sink)?,
            Instruction::Move { src, dst } => {
                let value = self.read(src);
                self.regs.set(dst, value);
            }
        }

        Ok(instr)
    }

    /// Run until halt.
    ///
    /// Returns the number of instructions executed. A program that never
    /// halts never returns; see [`Cpu::run_limited`].
    pub fn run<S: DumpSink + ?Sized>(&mut self, sink: &mut S) -> Result<u64, CpuError> {
        let start_cycles = self.cycles;

        while self.state == CpuState::Running {
            self.step(sink)?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Run for at most `max_cycles` instructions.
    pub fn run_limited<S: DumpSink + ?Sized>(
        &mut self,
        max_cycles: u64,
        sink: &mut S,
    ) -> Result<u64, CpuError> {
        let start_cycles = self.cycles;
        let limit = self.cycles.saturating_add(max_cycles);

        while self.state == CpuState::Running && self.cycles < limit {
            self.step(sink)?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Read a register as a move source.
    ///
    /// ALU_RESULT has no storage of its own; it reads the ROM entry keyed by
    /// the current ALU_A, ALU_B and ALU_OP.
    pub fn read(&self, reg: Reg) -> u8 {
        match reg {
            Reg::AluResult => self.alu.lookup(
                self.regs.get(Reg::AluA),
                self.regs.get(Reg::AluB),
                self.regs.get(Reg::AluOp),
            ),
            _ => self.regs.get(reg),
        }
    }

    fn execute<S: DumpSink + ?Sized>(&mut self, cmd: Command, sink: &mut S) -> Result<(), CpuError> {
        match cmd {
            Command::MemoryRead => {
                let byte = self.mem.read(self.address());
                self.regs.set(Reg::MemLow, nibble::low(byte));
                self.regs.set(Reg::MemHigh, nibble::high(byte));
            }

            Command::MemoryWrite => {
                let addr = self.address();
                if self.guard.is_writable(addr) {
                    let byte = nibble::join(self.regs.get(Reg::MemLow), self.regs.get(Reg::MemHigh));
                    self.mem.write(addr, byte);
                } else {
                    debug!("write to read-only address 0x{:04X} ignored", addr);
                }
            }

            Command::IncrementAddress => {
                let addr = self.address().wrapping_add(1);
                self.regs.set_address(addr);
            }

            Command::DecrementAddress => {
                let addr = self.address().wrapping_sub(1);
                self.regs.set_address(addr);
            }

            Command::Jump => self.jump(),

            Command::JumpIf => {
                if self.regs.get(Reg::Control) == 0 {
                    self.jump();
                }
            }

            Command::JumpLink => {
                let target = self.address();
                self.regs.set_address(self.pc);
                debug!("jump-and-link 0x{:04X} -> 0x{:04X}", self.pc, target);
                self.pc = target;
            }

            Command::Noop(_) => {}

            Command::Break => {
                debug!("break at 0x{:04X}", self.pc);
                sink.on_break(self.pc, self.regs.as_bytes())?;
            }

            Command::Halt => {
                debug!("halt at 0x{:04X} after {} cycles", self.pc, self.cycles);
                self.state = CpuState::Halted;
                sink.on_halt(self.pc, self.regs.as_bytes(), self.mem.as_bytes())?;
            }
        }

        Ok(())
    }

    fn jump(&mut self) {
        let target = self.address();
        debug!("jump 0x{:04X} -> 0x{:04X}", self.pc, target);
        self.pc = target;
    }

    /// The 16-bit address register.
    pub fn address(&self) -> u16 {
        self.regs.address()
    }

    /// The program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Move the program counter.
    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    /// The ALU ROM this CPU reads from.
    pub fn alu(&self) -> &AluRom {
        &self.alu
    }

    /// Check if the CPU is halted.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Check if the CPU is running.
    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl<G: WriteGuard> std::fmt::Debug for Cpu<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("state", &self.state)
            .field("pc", &format_args!("0x{:04X}", self.pc))
            .field("cycles", &self.cycles)
            .field("regs", &self.regs)
            .finish()
    }
}

/// Errors that can occur while stepping the CPU.
///
/// The instruction set itself is total; these are host-side conditions.
#[derive(Debug, Error)]
pub enum CpuError {
    #[error("CPU not running: {0:?}")]
    NotRunning(CpuState),

    #[error("diagnostic dump failed: {0}")]
    Dump(#[from] std::io::Error),
}
