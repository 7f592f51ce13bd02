//! The 48K address space.
//!
//! The whole 64K image is plain RAM from the machine's point of view: the
//! ROM is installed by writing it to $0000 and nothing stops a later write
//! from replacing it.

#![allow(clippy::large_stack_arrays)] // Intentional: the image is the full address space.

use crate::error::{Error, Result};

/// Size of the address space in bytes.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Size of the ROM area at $0000.
pub const ROM_SIZE: usize = 0x4000;

/// Seed for the power-on fill.
const POWER_ON_SEED: u64 = 0xDE34_7A01;

/// Multiplier for the power-on fill.
const POWER_ON_MULTIPLIER: u64 = 0x7439_2CEF;

/// 64K memory image.
///
/// Power-on contents are pseudo-random, like uninitialised DRAM, but the
/// generator is seeded with a constant so every instance starts with the same
/// bytes.
pub struct Memory48K {
    image: Box<[u8; MEMORY_SIZE]>,
}

impl Memory48K {
    #[must_use]
    pub fn new() -> Self {
        let mut image = Box::new([0u8; MEMORY_SIZE]);
        let mut rnd = POWER_ON_SEED;
        for cell in image.iter_mut() {
            *cell = rnd as u8;
            rnd = rnd.wrapping_mul(POWER_ON_MULTIPLIER) ^ (rnd >> 16);
        }
        Self { image }
    }

    /// Mutable reference to the cell at `addr`.
    #[inline]
    pub fn access(&mut self, addr: u16) -> &mut u8 {
        &mut self.image[usize::from(addr)]
    }

    /// Read a cell without going through the bus.
    #[inline]
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        self.image[usize::from(addr)]
    }

    /// The whole image, $0000 first.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.image[..]
    }

    /// The whole image, mutable. Used by hosts to install ROMs and programs.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.image[..]
    }

    /// `len` bytes starting at `addr`.
    pub fn read_block(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::block_range(addr, len)?;
        Ok(&self.image[range])
    }

    /// Copy `data` into memory starting at `addr`.
    pub fn write_block(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let range = Self::block_range(addr, data.len())?;
        self.image[range].copy_from_slice(data);
        Ok(())
    }

    fn block_range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = usize::from(addr);
        match start.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(start..end),
            _ => Err(Error::BlockOutOfRange { addr, len }),
        }
    }
}

impl Default for Memory48K {
    fn default() -> Self {
        Self::new()
    }
}
