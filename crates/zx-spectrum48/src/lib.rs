//! ZX Spectrum 48K memory, frame timing and screen rendering.
//!
//! The crate covers the machine side of a 48K Spectrum: the 64K memory
//! image, the 69,888-tick PAL frame, and the conversion of screen memory into
//! a packed 4-bit-per-pixel frame. The Z80 core is supplied by the caller as
//! an [`emu_core::Cpu`] and drives the machine through [`emu_core::Bus`].
//!
//! Screen pixels are rendered in two colours: set bits are black ink, clear
//! bits are white paper. Attribute bytes are not applied.

mod bus;
mod config;
mod error;
mod memory;
pub mod palette;
mod spectrum;
pub mod video;

pub use bus::{SpectrumBus, TICKS_PER_FRAME};
pub use config::SpectrumConfig;
pub use error::{Error, Result};
pub use memory::{MEMORY_SIZE, Memory48K, ROM_SIZE};
pub use spectrum::Spectrum48;
pub use video::{FrameBuffer, FrameChunk, ScreenRenderer};
