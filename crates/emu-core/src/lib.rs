//! Core traits and types for tick-counted emulation.
//!
//! A machine owns its memory and its tick counter. A CPU core only sees the
//! machine through [`Bus`], so the same core can drive any machine that
//! implements it.

mod bus;
mod cpu;
mod observable;
mod ticks;

pub use bus::{Bus, MemoryAccess, TickSink};
pub use cpu::Cpu;
pub use observable::{Observable, Value, parse_address};
pub use ticks::Ticks;
