//! Screen rendering.
//!
//! The frame is 352×280 pixels: a 256×192 screen with 48-pixel borders left,
//! right and top, and a 40-pixel border below. Pixels are packed eight to a
//! 32-bit chunk, leftmost pixel in the most significant nibble, and the frame
//! is stored as 280 lines of 44 chunks.
//!
//! # Screen memory layout
//!
//! The bitmap starts at $4000 with 32 bytes per pixel line, but lines are
//! interleaved: `010Y7 Y6Y2 Y1Y0 Y5Y4Y3 X4X3X2X1X0`. Moving down one pixel
//! line adds $0100 until bits 8-10 wrap, which happens every 8 lines; the
//! renderer then steps back to the next character row in the same third of
//! the screen, or on into the next third after 64 lines.

use emu_core::MemoryAccess;

use crate::palette::{BITS_PER_PIXEL, BLACK, WHITE, argb, rgb};

/// One packed group of [`PIXELS_PER_CHUNK`] frame pixels.
pub type FrameChunk = u32;

/// Frame pixels per chunk.
pub const PIXELS_PER_CHUNK: usize = 8;

const _: () = assert!(
    BITS_PER_PIXEL as usize * PIXELS_PER_CHUNK <= FrameChunk::BITS as usize,
    "frame chunk is too narrow for its pixels"
);

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 192;
pub const BORDER_WIDTH: usize = 48;
pub const TOP_BORDER_HEIGHT: usize = 48;
pub const BOTTOM_BORDER_HEIGHT: usize = 40;

pub const FRAME_WIDTH: usize = BORDER_WIDTH + SCREEN_WIDTH + BORDER_WIDTH;
pub const FRAME_HEIGHT: usize = TOP_BORDER_HEIGHT + SCREEN_HEIGHT + BOTTOM_BORDER_HEIGHT;

// The renderer only handles whole chunks, so every width must be a multiple
// of the chunk width. A geometry that is not fails const evaluation.
pub const CHUNKS_PER_BORDER_WIDTH: usize = div_exact(BORDER_WIDTH, PIXELS_PER_CHUNK);
pub const CHUNKS_PER_SCREEN_LINE: usize = div_exact(SCREEN_WIDTH, PIXELS_PER_CHUNK);
pub const CHUNKS_PER_FRAME_LINE: usize = div_exact(FRAME_WIDTH, PIXELS_PER_CHUNK);

/// First byte of the screen bitmap.
pub const SCREEN_BASE: u16 = 0x4000;

/// A chunk of eight white pixels.
pub const WHITE_CHUNK: FrameChunk = 0x1111_1111 * WHITE as FrameChunk;

/// `a / b`, refusing to truncate.
///
/// Used for the chunk counts, so a frame dimension that is not a whole
/// number of chunks stops the build:
///
/// ```compile_fail
/// use zx_spectrum48::video::div_exact;
///
/// const CHUNKS: usize = div_exact(250, 8);
/// let line = [0u32; CHUNKS];
/// ```
///
/// ```
/// use zx_spectrum48::video::div_exact;
///
/// const CHUNKS: usize = div_exact(352, 8);
/// assert_eq!(CHUNKS, 44);
/// ```
///
/// # Panics
///
/// Panics if `a` is not a multiple of `b`.
#[must_use]
pub const fn div_exact(a: usize, b: usize) -> usize {
    assert!(a.is_multiple_of(b), "dimension is not a whole number of chunks");
    a / b
}

/// Pack one screen byte into a chunk: set bits are black ink, clear bits
/// white paper, bit 7 leftmost.
#[must_use]
pub fn pack_screen_byte(byte: u8) -> FrameChunk {
    (0..8).rev().fold(0, |chunk, bit| {
        let pixel = if byte & (1 << bit) != 0 { BLACK } else { WHITE };
        (chunk << BITS_PER_PIXEL) | FrameChunk::from(pixel)
    })
}

/// Bitmap address of the line below `addr`.
///
/// Only meaningful for the first byte of a pixel line. The step past the
/// last line (from $57E0) lands on $5800, the start of the attributes.
#[must_use]
pub fn next_line_addr(addr: u16) -> u16 {
    let addr = addr.wrapping_add(0x0100);
    if addr & 0x0700 != 0 {
        return addr;
    }
    // Bits 8-10 wrapped: on to the next character row.
    let addr = addr.wrapping_add(0x0020);
    if addr & 0x00FF < 0x0020 {
        // Low byte wrapped too: the next third of the screen.
        addr.wrapping_sub(0x0100)
    } else {
        addr.wrapping_sub(0x0800)
    }
}

/// Bitmap addresses of the 192 screen lines, top to bottom.
pub fn screen_line_addrs() -> impl Iterator<Item = u16> {
    let lines = std::iter::successors(Some(SCREEN_BASE), |&addr| Some(next_line_addr(addr)));
    lines.take(SCREEN_HEIGHT)
}

/// One line of frame chunks.
pub type FrameLine = [FrameChunk; CHUNKS_PER_FRAME_LINE];

/// A rendered frame.
#[derive(Clone)]
pub struct FrameBuffer {
    lines: Box<[FrameLine; FRAME_HEIGHT]>,
}

impl FrameBuffer {
    fn new() -> Self {
        Self {
            lines: Box::new([[WHITE_CHUNK; CHUNKS_PER_FRAME_LINE]; FRAME_HEIGHT]),
        }
    }

    /// All lines, top border first.
    #[must_use]
    pub fn lines(&self) -> &[FrameLine; FRAME_HEIGHT] {
        &self.lines
    }

    /// 4-bit pixel at frame coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the frame.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let chunk = self.lines[y][x / PIXELS_PER_CHUNK];
        let shift = (PIXELS_PER_CHUNK - 1 - x % PIXELS_PER_CHUNK) as u32 * BITS_PER_PIXEL;
        ((chunk >> shift) & 0x0F) as u8
    }

    /// The chunks as little-endian bytes, line by line (49,280 bytes).
    #[must_use]
    pub fn chunk_bytes(&self) -> Vec<u8> {
        self.lines
            .iter()
            .flatten()
            .flat_map(|chunk| chunk.to_le_bytes())
            .collect()
    }

    /// The frame as ARGB32 pixels, row-major.
    #[must_use]
    pub fn to_argb32(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(FRAME_WIDTH * FRAME_HEIGHT);
        self.for_each_pixel(|pixel| out.push(argb(pixel)));
        out
    }

    /// The frame as RGB24 bytes, row-major.
    #[must_use]
    pub fn to_rgb24(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FRAME_WIDTH * FRAME_HEIGHT * 3);
        self.for_each_pixel(|pixel| out.extend_from_slice(&rgb(pixel)));
        out
    }

    fn for_each_pixel(&self, mut f: impl FnMut(u8)) {
        for &chunk in self.lines.iter().flatten() {
            for i in (0..PIXELS_PER_CHUNK).rev() {
                f(((chunk >> (i as u32 * BITS_PER_PIXEL)) & 0x0F) as u8);
            }
        }
    }
}

/// Builds frames from screen memory.
///
/// Every call to [`render`](Self::render) overwrites the whole frame. Nothing
/// is kept between frames except the buffer itself.
#[derive(Clone)]
pub struct ScreenRenderer {
    frame: FrameBuffer,
}

impl ScreenRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: FrameBuffer::new(),
        }
    }

    /// The last rendered frame (all white before the first render).
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Render the current contents of `memory`.
    ///
    /// Screen bytes are read through `access`, one per chunk, in the order
    /// the beam would fetch them. Border chunks never read memory.
    pub fn render<M: MemoryAccess + ?Sized>(&mut self, memory: &mut M) -> &FrameBuffer {
        let (top, rest) = self.frame.lines.split_at_mut(TOP_BORDER_HEIGHT);
        let (screen, bottom) = rest.split_at_mut(SCREEN_HEIGHT);

        for line in top.iter_mut().chain(bottom.iter_mut()) {
            line.fill(WHITE_CHUNK);
        }

        for (line, line_addr) in screen.iter_mut().zip(screen_line_addrs()) {
            let (left, rest) = line.split_at_mut(CHUNKS_PER_BORDER_WIDTH);
            let (pixels, right) = rest.split_at_mut(CHUNKS_PER_SCREEN_LINE);

            left.fill(WHITE_CHUNK);
            let mut addr = line_addr;
            for chunk in pixels {
                *chunk = pack_screen_byte(*memory.access(addr));
                addr = addr.wrapping_add(1);
            }
            right.fill(WHITE_CHUNK);
        }

        &self.frame
    }
}

impl Default for ScreenRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat 64K memory that counts reads.
    struct TestMemory {
        cells: Vec<u8>,
        reads: Vec<u16>,
    }

    impl TestMemory {
        fn filled(value: u8) -> Self {
            Self {
                cells: vec![value; 0x1_0000],
                reads: Vec::new(),
            }
        }
    }

    impl MemoryAccess for TestMemory {
        fn access(&mut self, address: u16) -> &mut u8 {
            self.reads.push(address);
            &mut self.cells[usize::from(address)]
        }
    }

    #[test]
    fn geometry() {
        assert_eq!(FRAME_WIDTH, 352);
        assert_eq!(FRAME_HEIGHT, 280);
        assert_eq!(CHUNKS_PER_BORDER_WIDTH, 6);
        assert_eq!(CHUNKS_PER_SCREEN_LINE, 32);
        assert_eq!(CHUNKS_PER_FRAME_LINE, 44);
        assert_eq!(WHITE_CHUNK, 0x7777_7777);
    }

    #[test]
    #[should_panic(expected = "dimension is not a whole number of chunks")]
    fn div_exact_rejects_remainder() {
        let width = std::hint::black_box(250);
        let _ = div_exact(width, PIXELS_PER_CHUNK);
    }

    #[test]
    fn screen_byte_packing() {
        // Bits 1,0,1,1,0,0,0,0 -> black, white, black, black, white × 4.
        assert_eq!(pack_screen_byte(0b1011_0000), 0x0700_7777);
        assert_eq!(pack_screen_byte(0x00), WHITE_CHUNK);
        assert_eq!(pack_screen_byte(0xFF), 0x0000_0000);
        assert_eq!(pack_screen_byte(0x01), 0x7777_7770);
        assert_eq!(pack_screen_byte(0x80), 0x0777_7777);
    }

    #[test]
    fn line_addresses_across_first_third_boundary() {
        let addrs: Vec<u16> = screen_line_addrs().collect();
        assert_eq!(addrs.len(), SCREEN_HEIGHT);
        assert_eq!(
            &addrs[..10],
            &[
                0x4000, 0x4100, 0x4200, 0x4300, 0x4400, 0x4500, 0x4600, 0x4700, //
                0x4020, 0x4120,
            ]
        );
        assert_eq!(
            &addrs[56..72],
            &[
                0x40E0, 0x41E0, 0x42E0, 0x43E0, 0x44E0, 0x45E0, 0x46E0, 0x47E0, //
                0x4800, 0x4900, 0x4A00, 0x4B00, 0x4C00, 0x4D00, 0x4E00, 0x4F00,
            ]
        );
        assert_eq!(
            &addrs[120..136],
            &[
                0x48E0, 0x49E0, 0x4AE0, 0x4BE0, 0x4CE0, 0x4DE0, 0x4EE0, 0x4FE0, //
                0x5000, 0x5100, 0x5200, 0x5300, 0x5400, 0x5500, 0x5600, 0x5700,
            ]
        );
        assert_eq!(addrs[191], 0x57E0);
        assert_eq!(next_line_addr(0x57E0), 0x5800);
    }

    #[test]
    fn line_addresses_match_bitmap_layout() {
        for (y, addr) in screen_line_addrs().enumerate() {
            let expected = 0x4000 | ((y & 0xC0) << 5) | ((y & 0x07) << 8) | ((y & 0x38) << 2);
            assert_eq!(usize::from(addr), expected, "line {y}");
        }
    }

    #[test]
    fn border_is_white_whatever_memory_holds() {
        let screen = TOP_BORDER_HEIGHT..TOP_BORDER_HEIGHT + SCREEN_HEIGHT;
        let pixels = CHUNKS_PER_BORDER_WIDTH..CHUNKS_PER_BORDER_WIDTH + CHUNKS_PER_SCREEN_LINE;
        for fill in [0x00, 0xFF, 0xA5] {
            let mut memory = TestMemory::filled(fill);
            let mut renderer = ScreenRenderer::new();
            let frame = renderer.render(&mut memory);

            for (y, line) in frame.lines().iter().enumerate() {
                for (x, &chunk) in line.iter().enumerate() {
                    if screen.contains(&y) && pixels.contains(&x) {
                        assert_eq!(chunk, pack_screen_byte(fill));
                    } else {
                        assert_eq!(chunk, WHITE_CHUNK, "border chunk {x} of line {y}");
                    }
                }
            }
        }
    }

    #[test]
    fn reads_exactly_the_bitmap_once() {
        let mut memory = TestMemory::filled(0);
        ScreenRenderer::new().render(&mut memory);

        assert_eq!(memory.reads.len(), SCREEN_HEIGHT * CHUNKS_PER_SCREEN_LINE);
        let mut sorted = memory.reads.clone();
        sorted.sort_unstable();
        let bitmap: Vec<u16> = (0x4000..0x5800).collect();
        assert_eq!(sorted, bitmap);

        // Beam order: line 1 starts at $4100, straight after the 32 bytes of line 0.
        assert_eq!(memory.reads[31], 0x401F);
        assert_eq!(memory.reads[32], 0x4100);
    }

    #[test]
    fn pixels_land_at_frame_coordinates() {
        let mut memory = TestMemory::filled(0);
        // Line 8 of the screen is the first line of the second character row.
        memory.cells[0x4020] = 0b1000_0001;
        let mut renderer = ScreenRenderer::new();
        let frame = renderer.render(&mut memory);

        let y = TOP_BORDER_HEIGHT + 8;
        assert_eq!(frame.pixel(BORDER_WIDTH, y), BLACK);
        assert_eq!(frame.pixel(BORDER_WIDTH + 1, y), WHITE);
        assert_eq!(frame.pixel(BORDER_WIDTH + 7, y), BLACK);
        assert_eq!(frame.pixel(BORDER_WIDTH + 8, y), WHITE);
        assert_eq!(frame.pixel(BORDER_WIDTH, y - 1), WHITE);
    }

    #[test]
    fn render_overwrites_previous_frame() {
        let mut memory = TestMemory::filled(0xFF);
        let mut renderer = ScreenRenderer::new();
        let frame = renderer.render(&mut memory);
        assert_eq!(frame.pixel(BORDER_WIDTH, TOP_BORDER_HEIGHT), BLACK);

        memory.cells.fill(0x00);
        let frame = renderer.render(&mut memory);
        assert!(frame.lines().iter().flatten().all(|&c| c == WHITE_CHUNK));
    }

    #[test]
    fn pixel_conversions() {
        let mut memory = TestMemory::filled(0);
        memory.cells[0x4000] = 0x80;
        let frame = ScreenRenderer::new().render(&mut memory).clone();

        let bytes = frame.chunk_bytes();
        assert_eq!(bytes.len(), 49_280);
        assert_eq!(&bytes[..4], &[0x77, 0x77, 0x77, 0x77]);

        let argb = frame.to_argb32();
        assert_eq!(argb.len(), FRAME_WIDTH * FRAME_HEIGHT);
        let first_screen_pixel = TOP_BORDER_HEIGHT * FRAME_WIDTH + BORDER_WIDTH;
        assert_eq!(argb[first_screen_pixel], 0xFF00_0000);
        assert_eq!(argb[first_screen_pixel + 1], 0xFFCD_CDCD);
        assert_eq!(argb[0], 0xFFCD_CDCD);

        let rgb = frame.to_rgb24();
        assert_eq!(rgb.len(), FRAME_WIDTH * FRAME_HEIGHT * 3);
        let start = first_screen_pixel * 3;
        assert_eq!(&rgb[start..start + 6], &[0, 0, 0, 0xCD, 0xCD, 0xCD]);
    }
}
