//! Memory access and timing hooks exposed to CPU cores.

/// Direct access to a 16-bit address space.
///
/// The returned reference is used for both reads and writes, so a CPU core
/// can read-modify-write a cell through a single call.
pub trait MemoryAccess {
    /// Reference to the memory cell at `address`.
    fn access(&mut self, address: u16) -> &mut u8;
}

/// Receiver for elapsed execution time.
pub trait TickSink {
    /// Account for `ticks` units of elapsed time.
    fn tick(&mut self, ticks: u32);
}

/// Everything a CPU core needs from the machine it runs on.
///
/// Implemented automatically for any type that provides both memory access
/// and a tick sink.
pub trait Bus: MemoryAccess + TickSink {}

impl<T: MemoryAccess + TickSink + ?Sized> Bus for T {}
