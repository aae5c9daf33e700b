//! WebAssembly bindings for the nibble emulator.
//!
//! This module provides JavaScript-friendly wrappers around the core emulator.

use wasm_bindgen::prelude::*;
use crate::{AluRom, Cpu, DumpSink};
use serde::Serialize;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Collects break/halt dumps as text lines for the JS side.
#[derive(Default)]
struct TrapLog {
    lines: Vec<String>,
}

impl DumpSink for TrapLog {
    fn on_break(&mut self, pc: u16, registers: &[u8; 16]) -> std::io::Result<()> {
        self.lines.push(format!("Break at address 0x{:04X}", pc));
        self.lines.push(crate::hexdump(registers));
        Ok(())
    }

    fn on_halt(&mut self, pc: u16, registers: &[u8; 16], _memory: &[u8]) -> std::io::Result<()> {
        // memory stays reachable through memory_at
        self.lines.push(format!("Halt at address 0x{:04X}", pc));
        self.lines.push(crate::hexdump(registers));
        Ok(())
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    pc: u16,
    address: u16,
    cycles: u64,
    state: crate::CpuState,
    registers: &'a crate::Registers,
}

/// WebAssembly-friendly CPU wrapper.
///
/// The trap log keeps only the register dumps; read memory after a halt
/// through `memory_at`.
#[wasm_bindgen]
pub struct WasmCpu {
    cpu: Cpu,
    program: Vec<u8>,
    log: TrapLog,
}

#[wasm_bindgen]
impl WasmCpu {
    /// Create a CPU running `program`. Without `alu_rom` the standard table
    /// is generated.
    #[wasm_bindgen(constructor)]
    pub fn new(program: Vec<u8>, alu_rom: Option<Vec<u8>>) -> Self {
        let alu = match alu_rom {
            Some(bytes) => AluRom::from_image(Some(bytes.as_slice())),
            None => AluRom::standard(),
        };
        Self {
            cpu: Cpu::with_alu(alu, Some(program.as_slice())),
            program,
            log: TrapLog::default(),
        }
    }

    /// Step one instruction. Returns the decoded instruction.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<String, JsError> {
        let instr = self.cpu.step(&mut self.log)
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(format!("{:?}", instr))
    }

    /// Run until halt or max cycles.
    #[wasm_bindgen]
    pub fn run(&mut self, max_cycles: u32) -> u64 {
        let _ = self.cpu.run_limited(max_cycles as u64, &mut self.log);
        self.cpu.cycles
    }

    /// Reload the program and zero the CPU.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.cpu = Cpu::with_alu(self.cpu.alu().clone(), Some(self.program.as_slice()));
        self.log.lines.clear();
    }

    /// Check if CPU is halted.
    #[wasm_bindgen]
    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Get cycle count.
    #[wasm_bindgen]
    pub fn cycles(&self) -> u64 {
        self.cpu.cycles
    }

    /// Get program counter.
    #[wasm_bindgen]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    /// Get the 16-bit address register.
    #[wasm_bindgen]
    pub fn address(&self) -> u16 {
        self.cpu.address()
    }

    /// Get the 16 register nibbles.
    #[wasm_bindgen]
    pub fn registers(&self) -> Vec<u8> {
        self.cpu.regs.as_bytes().to_vec()
    }

    /// Get the memory byte at `addr`.
    #[wasm_bindgen]
    pub fn memory_at(&self, addr: u16) -> u8 {
        self.cpu.mem.read(addr)
    }

    /// Break/halt output so far, one entry per line group.
    #[wasm_bindgen]
    pub fn trap_log(&self) -> Vec<String> {
        self.log.lines.clone()
    }

    /// Get pc, address, cycles, state and registers as a JSON string.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        let snapshot = Snapshot {
            pc: self.cpu.pc(),
            address: self.cpu.address(),
            cycles: self.cpu.cycles,
            state: self.cpu.state,
            registers: &self.cpu.regs,
        };
        serde_json::to_string(&snapshot).map_err(|e| JsError::new(&format!("{}", e)))
    }
}

/// Build the standard ALU ROM image.
#[wasm_bindgen]
pub fn wasm_build_alu_rom() -> Vec<u8> {
    AluRom::standard().as_bytes().to_vec()
}
