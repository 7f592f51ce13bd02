//! Machine configuration.

/// Configuration for creating a [`Spectrum48`](crate::Spectrum48).
#[derive(Debug, Clone, Default)]
pub struct SpectrumConfig {
    /// ROM image, copied to $0000 after the power-on fill. At most 16,384
    /// bytes; a shorter image leaves the rest of $0000-$3FFF with its
    /// power-on contents. `None` leaves the whole image as filled.
    pub rom: Option<Vec<u8>>,
}
