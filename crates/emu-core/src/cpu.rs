//! CPU core trait.

use crate::Bus;

/// A CPU core that executes one instruction at a time.
///
/// The machine is passed in, not owned. During `step` the core calls
/// [`TickSink::tick`](crate::TickSink::tick) for the time the instruction
/// takes and [`MemoryAccess::access`](crate::MemoryAccess::access) for every
/// memory cell it touches.
///
/// Every call must consume a non-zero number of ticks. Machines that run a
/// core until a time budget is met treat a step that consumes nothing as a
/// broken core.
pub trait Cpu {
    /// Execute one instruction against `bus`.
    fn step<B: Bus + ?Sized>(&mut self, bus: &mut B);
}
