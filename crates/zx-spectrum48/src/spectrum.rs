//! Top-level 48K machine.
//!
//! Pairs a caller-supplied CPU core with the memory/timing bus and the screen
//! renderer. Hosts drive it one frame at a time:
//!
//! 1. `execute_frame()` steps the CPU until 69,888 ticks have elapsed;
//! 2. `render_frame()` turns screen memory into a frame.
//!
//! `run_frame(true)` does both. Rendering between frames is always valid;
//! rendering is never done mid-frame because the bus is borrowed by the CPU
//! for the whole of `execute_frame`.

use emu_core::{Cpu, Observable, Ticks, Value, parse_address};
use log::{debug, info, trace};

use crate::bus::SpectrumBus;
use crate::config::SpectrumConfig;
use crate::error::{Error, Result};
use crate::memory::ROM_SIZE;
use crate::video::{FRAME_HEIGHT, FRAME_WIDTH, FrameBuffer, ScreenRenderer};

/// ZX Spectrum 48K.
pub struct Spectrum48<C: Cpu> {
    cpu: C,
    bus: SpectrumBus,
    renderer: ScreenRenderer,
    /// Completed frame counter.
    frame_count: u64,
}

impl<C: Cpu> Spectrum48<C> {
    /// Create a machine around `cpu`.
    ///
    /// Memory gets its power-on fill, then the configured ROM (if any) is
    /// copied to $0000.
    pub fn new(cpu: C, config: &SpectrumConfig) -> Result<Self> {
        let mut bus = SpectrumBus::new();
        match &config.rom {
            Some(rom) if rom.len() > ROM_SIZE => {
                return Err(Error::RomTooLarge { len: rom.len() });
            }
            Some(rom) => {
                bus.memory.write_block(0x0000, rom)?;
                info!("ZX Spectrum 48K: installed {}-byte ROM", rom.len());
            }
            None => info!("ZX Spectrum 48K: no ROM installed"),
        }

        Ok(Self {
            cpu,
            bus,
            renderer: ScreenRenderer::new(),
            frame_count: 0,
        })
    }

    /// Run the CPU for one frame.
    ///
    /// Any ticks the last instruction ran past the frame boundary are kept
    /// and count towards the next frame.
    pub fn execute_frame(&mut self) {
        self.bus.run_until_frame_boundary(&mut self.cpu);
        self.frame_count += 1;
        debug!(
            "frame {} complete, {} ticks carried",
            self.frame_count,
            self.bus.elapsed_ticks()
        );
    }

    /// Render screen memory into the frame buffer.
    pub fn render_frame(&mut self) -> &FrameBuffer {
        trace!("rendering frame {}", self.frame_count);
        self.renderer.render(&mut self.bus)
    }

    /// Execute one frame, then render it if `render` is set.
    pub fn run_frame(&mut self, render: bool) {
        self.execute_frame();
        if render {
            self.render_frame();
        }
    }

    /// The last rendered frame.
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        self.renderer.frame()
    }

    /// The whole 64K memory image.
    #[must_use]
    pub fn memory(&self) -> &[u8] {
        self.bus.memory.as_slice()
    }

    /// The whole 64K memory image, mutable.
    pub fn memory_mut(&mut self) -> &mut [u8] {
        self.bus.memory.as_mut_slice()
    }

    /// `len` bytes of memory starting at `addr`.
    pub fn read_block(&self, addr: u16, len: usize) -> Result<&[u8]> {
        self.bus.memory.read_block(addr, len)
    }

    /// Copy `data` into memory starting at `addr`.
    pub fn write_block(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        self.bus.memory.write_block(addr, data)
    }

    /// Ticks into the current frame.
    #[must_use]
    pub fn elapsed_ticks(&self) -> Ticks {
        self.bus.elapsed_ticks()
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &C {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut C {
        &mut self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &SpectrumBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut SpectrumBus {
        &mut self.bus
    }
}

impl<C: Cpu> Observable for Spectrum48<C> {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("memory.") {
            parse_address(rest).map(|addr| Value::U8(self.bus.memory.peek(addr)))
        } else {
            match path {
                "ticks" => Some(self.bus.elapsed_ticks().get().into()),
                "frame_count" => Some(self.frame_count.into()),
                "frame.width" => Some((FRAME_WIDTH as u32).into()),
                "frame.height" => Some((FRAME_HEIGHT as u32).into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "ticks",
            "frame_count",
            "frame.width",
            "frame.height",
            "memory.<address>",
        ]
    }
}
