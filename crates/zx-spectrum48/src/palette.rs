//! Frame pixel format and the Spectrum's 16-colour palette.
//!
//! A frame pixel is 4 bits in brightness:grb order. The three colour bits
//! are laid out like the ULA's own colour numbers (blue = 1, red = 2,
//! green = 4), so a pixel value indexes [`PALETTE`] directly.

pub const BITS_PER_PIXEL: u32 = 4;

pub const BRIGHTNESS_BIT: u32 = 3;
pub const GREEN_BIT: u32 = 2;
pub const RED_BIT: u32 = 1;
pub const BLUE_BIT: u32 = 0;

pub const BRIGHTNESS_MASK: u8 = 1 << BRIGHTNESS_BIT;
pub const GREEN_MASK: u8 = 1 << GREEN_BIT;
pub const RED_MASK: u8 = 1 << RED_BIT;
pub const BLUE_MASK: u8 = 1 << BLUE_BIT;

/// Ink for set screen bits.
pub const BLACK: u8 = 0;

/// Paper for clear screen bits, and the border.
pub const WHITE: u8 = RED_MASK | GREEN_MASK | BLUE_MASK;

/// ARGB32 palette indexed by 4-bit frame pixel.
///
/// Normal colours use intensity 0xCD, bright ones 0xFF. Black is the same
/// either way.
pub const PALETTE: [u32; 16] = [
    // Normal (brightness = 0)
    0xFF00_0000, // 0: Black
    0xFF00_00CD, // 1: Blue
    0xFFCD_0000, // 2: Red
    0xFFCD_00CD, // 3: Magenta
    0xFF00_CD00, // 4: Green
    0xFF00_CDCD, // 5: Cyan
    0xFFCD_CD00, // 6: Yellow
    0xFFCD_CDCD, // 7: White
    // Bright (brightness = 1)
    0xFF00_0000, // 8: Black
    0xFF00_00FF, // 9: Bright Blue
    0xFFFF_0000, // 10: Bright Red
    0xFFFF_00FF, // 11: Bright Magenta
    0xFF00_FF00, // 12: Bright Green
    0xFF00_FFFF, // 13: Bright Cyan
    0xFFFF_FF00, // 14: Bright Yellow
    0xFFFF_FFFF, // 15: Bright White
];

/// ARGB32 colour of a 4-bit frame pixel. Bits above the low nibble are
/// ignored.
#[inline]
#[must_use]
pub fn argb(pixel: u8) -> u32 {
    PALETTE[usize::from(pixel & 0x0F)]
}

/// RGB bytes of a 4-bit frame pixel.
#[inline]
#[must_use]
pub fn rgb(pixel: u8) -> [u8; 3] {
    let [_, r, g, b] = argb(pixel).to_be_bytes();
    [r, g, b]
}
