//! Main memory and the write guard.
//!
//! Memory is a flat 64 KiB byte array addressed by the 16-bit address
//! register. Program images are loaded verbatim from address 0.

use serde::{Deserialize, Serialize};

/// The number of bytes of main memory.
pub const MEMORY_SIZE: usize = 0x10000;

/// 64 KiB of byte-addressable memory.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Create a memory with every byte zeroed.
    pub fn new() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE],
        }
    }

    /// Create a memory from an image, truncating or zero-padding it to 64 KiB.
    pub fn from_image(image: Option<&[u8]>) -> Self {
        let mut mem = Self::new();
        if let Some(bytes) = image {
            mem.load_image(bytes);
        }
        mem
    }

    /// Copy `image` to address 0. Bytes past the end of memory are dropped.
    pub fn load_image(&mut self, image: &[u8]) {
        let len = image.len().min(MEMORY_SIZE);
        self.bytes[..len].copy_from_slice(&image[..len]);
    }

    /// Read the byte at `addr`.
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    /// Write the byte at `addr`. This bypasses the write guard.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// The whole memory as a slice, for dumps.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let non_zero = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Memory")
            .field("non_zero_bytes", &non_zero)
            .field("total_bytes", &MEMORY_SIZE)
            .finish()
    }
}

/// Decides which addresses the memory-write command may store to.
///
/// Every write issued by a running program goes through this check, so a
/// guard can carve read-only regions (a ROM window, say) out of memory.
pub trait WriteGuard {
    fn is_writable(&self, addr: u16) -> bool;
}

/// The default guard: all of memory is RAM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllWritable;

impl WriteGuard for AllWritable {
    #[inline]
    fn is_writable(&self, _addr: u16) -> bool {
        true
    }
}

impl<F> WriteGuard for F
where
    F: Fn(u16) -> bool,
{
    #[inline]
    fn is_writable(&self, addr: u16) -> bool {
        self(addr)
    }
}
