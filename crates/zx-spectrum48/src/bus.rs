//! Memory and timing store.
//!
//! The bus owns the memory image and the tick counter. A CPU core sees it
//! only through `emu_core::Bus`: it reads and writes cells with `access` and
//! reports the time each instruction takes with `tick`.
//!
//! # Frame timing (48K PAL)
//!
//! One frame is 69,888 ticks (312 lines × 224 T-states). Instructions do not
//! end on frame boundaries, so the instruction that crosses the boundary
//! usually overshoots it. The overshoot is carried into the next frame rather
//! than dropped, which keeps frames from drifting against each other.

use emu_core::{Cpu, MemoryAccess, TickSink, Ticks};

use crate::memory::Memory48K;

/// Ticks in one 48K PAL frame.
pub const TICKS_PER_FRAME: Ticks = Ticks::new(69_888);

/// The Spectrum's memory and tick counter, as seen by the CPU core.
pub struct SpectrumBus {
    pub memory: Memory48K,
    /// Ticks elapsed since the last frame boundary.
    ticks: Ticks,
}

impl SpectrumBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: Memory48K::new(),
            ticks: Ticks::ZERO,
        }
    }

    /// Add `amount` ticks to the counter.
    pub fn advance_time(&mut self, amount: u32) {
        self.ticks += amount;
    }

    /// Ticks elapsed since the last frame boundary (plus any carried
    /// overshoot).
    #[must_use]
    pub fn elapsed_ticks(&self) -> Ticks {
        self.ticks
    }

    /// Step `cpu` until a frame's worth of ticks has elapsed, then start the
    /// next frame.
    ///
    /// The counter is reduced by [`TICKS_PER_FRAME`], not reset, so the
    /// overshoot of the last instruction counts towards the next frame.
    ///
    /// # Panics
    ///
    /// Panics if a step leaves the tick counter unchanged. A core that stops
    /// making progress would otherwise hang this loop forever.
    pub fn run_until_frame_boundary<C: Cpu>(&mut self, cpu: &mut C) {
        while self.ticks < TICKS_PER_FRAME {
            let before = self.ticks;
            cpu.step(self);
            assert!(
                self.ticks > before,
                "CPU step consumed no ticks (counter stuck at {before})"
            );
        }
        self.ticks -= TICKS_PER_FRAME;
    }
}

impl Default for SpectrumBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccess for SpectrumBus {
    #[inline]
    fn access(&mut self, address: u16) -> &mut u8 {
        self.memory.access(address)
    }
}

impl TickSink for SpectrumBus {
    #[inline]
    fn tick(&mut self, ticks: u32) {
        self.advance_time(ticks);
    }
}
