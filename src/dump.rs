//! Diagnostic dumps for the break and halt commands.
//!
//! The CPU only hands over raw bytes through [`DumpSink`]. Rendering is up
//! to the sink; [`HexDumpSink`] prints them in the canonical `hexdump -C`
//! layout.

use std::io::{self, Write};

/// Receives the state exposed by the break and halt commands.
///
/// `pc` is the program counter at the time of the trap, which already points
/// past the trapping instruction.
pub trait DumpSink {
    fn on_break(&mut self, pc: u16, registers: &[u8; 16]) -> io::Result<()>;

    fn on_halt(&mut self, pc: u16, registers: &[u8; 16], memory: &[u8]) -> io::Result<()>;
}

/// Discards every dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DumpSink for NullSink {
    fn on_break(&mut self, _pc: u16, _registers: &[u8; 16]) -> io::Result<()> {
        Ok(())
    }

    fn on_halt(&mut self, _pc: u16, _registers: &[u8; 16], _memory: &[u8]) -> io::Result<()> {
        Ok(())
    }
}

/// Writes dumps as text: a header line tagged with the pc, then hex dumps.
#[derive(Debug)]
pub struct HexDumpSink<W: Write> {
    out: W,
}

impl<W: Write> HexDumpSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DumpSink for HexDumpSink<W> {
    fn on_break(&mut self, pc: u16, registers: &[u8; 16]) -> io::Result<()> {
        writeln!(self.out, "Break at address 0x{:04X}", pc)?;
        write_hexdump(&mut self.out, registers)?;
        self.out.flush()
    }

    fn on_halt(&mut self, pc: u16, registers: &[u8; 16], memory: &[u8]) -> io::Result<()> {
        writeln!(self.out, "Halt at address 0x{:04X}", pc)?;
        write_hexdump(&mut self.out, registers)?;
        write_hexdump(&mut self.out, memory)?;
        self.out.flush()
    }
}

/// Render `data` the way `hexdump -C` does.
pub fn hexdump(data: &[u8]) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_hexdump(&mut out, data);
    String::from_utf8_lossy(&out).into_owned()
}

/// Stream `data` to `out` in `hexdump -C` layout.
///
/// A run of lines identical to the one before is collapsed into a single
/// `*`, and the dump ends with the total length. Empty input prints nothing.
pub fn write_hexdump<W: Write + ?Sized>(out: &mut W, data: &[u8]) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let mut previous: Option<&[u8]> = None;
    let mut squeezing = false;

    for (line, chunk) in data.chunks(16).enumerate() {
        if previous == Some(chunk) {
            if !squeezing {
                writeln!(out, "*")?;
                squeezing = true;
            }
            continue;
        }
        squeezing = false;
        previous = Some(chunk);

        write!(out, "{:08x} ", line * 16)?;
        for i in 0..16 {
            if i == 8 {
                write!(out, " ")?;
            }
            match chunk.get(i) {
                Some(byte) => write!(out, " {:02x}", byte)?,
                None => write!(out, "   ")?,
            }
        }
        write!(out, "  |")?;
        for &byte in chunk {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            write!(out, "{}", c)?;
        }
        writeln!(out, "|")?;
    }

    writeln!(out, "{:08x}", data.len())
}
