//! Errors for the host-facing parts of the machine.
//!
//! Emulation itself has no recoverable failures. These cover block transfers
//! and construction from a [`SpectrumConfig`](crate::SpectrumConfig).

use thiserror::Error;

/// Result type, equivalent to [`std::result::Result`]<T, [`enum@Error`]>
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A block transfer would run past the end of the address space.
    #[error("block of {len} bytes at {addr:#06x} runs past $FFFF")]
    BlockOutOfRange { addr: u16, len: usize },
    /// The ROM image does not fit below $4000.
    #[error("ROM image is {len} bytes, at most 16384 fit below $4000")]
    RomTooLarge { len: usize },
}
