//! Pixel packing into RGB565 and RGB565+alpha streams
//!
//! Both packings truncate color channels to 5-6-5 bits. The bit layout is a
//! hardware contract with the target display driver and must match exactly:
//!
//! - Opaque: one 16-bit word per pixel, `RRRRRGGGGGGBBBBB`.
//! - Alpha: three bytes per pixel, the 16-bit color split across the first
//!   two bytes (`RRRRRGGG`, `GGGBBBBB`) followed by the full 8-bit alpha.

use image::DynamicImage;

use crate::tiles::TileGeometry;

/// The packed pixel payload of one image, in tile-major order.
///
/// This is the canonical intermediate: every rendered header is a textual
/// view of this sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedStream {
    /// One 16-bit word per pixel (opaque images).
    Rgb565(Vec<u16>),
    /// Three bytes per pixel: split color plus alpha (translucent images).
    Rgba5658(Vec<u8>),
}

impl PackedStream {
    /// Whether this is the 3-byte alpha packing.
    pub fn is_alpha(&self) -> bool {
        matches!(self, PackedStream::Rgba5658(_))
    }

    /// Number of stored elements: 16-bit words for the opaque packing,
    /// bytes for the alpha packing. Matches the emitted `_size` constant.
    pub fn element_count(&self) -> usize {
        match self {
            PackedStream::Rgb565(words) => words.len(),
            PackedStream::Rgba5658(bytes) => bytes.len(),
        }
    }
}

/// Pack an 8-bit RGB pixel into a 16-bit RGB565 word.
///
/// The top 5 bits of red, top 6 of green and top 5 of blue, most
/// significant channel first.
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b as u16) >> 3)
}

/// Pack an 8-bit RGBA pixel into the 3-byte RGB565+alpha layout.
///
/// The 5-6-5 color is split across the first two bytes; the third byte is
/// the alpha channel verbatim.
pub fn pack_rgba5658(r: u8, g: u8, b: u8, a: u8) -> [u8; 3] {
    [
        (r & 0xF8) | ((g >> 5) & 0x07),
        ((g << 3) & 0xE0) | ((b & 0xF8) >> 3),
        a,
    ]
}

/// Encode a decoded image into a packed stream, visiting pixels in the
/// geometry's tile-major order.
///
/// The alpha packing is chosen if and only if the decoded pixel format
/// carries an alpha channel; the file extension has no say in it.
///
/// Panics if the produced element count does not match the geometry - a
/// contract violation, not a recoverable condition.
pub fn encode(image: &DynamicImage, geometry: TileGeometry) -> PackedStream {
    if image.color().has_alpha() {
        let pixels = image.to_rgba8();
        let mut bytes = Vec::with_capacity(geometry.pixel_count() as usize * 3);
        for (x, y) in geometry.coords() {
            let p = pixels.get_pixel(x, y);
            bytes.extend_from_slice(&pack_rgba5658(p[0], p[1], p[2], p[3]));
        }
        assert_eq!(
            bytes.len(),
            geometry.pixel_count() as usize * 3,
            "packed stream length mismatch"
        );
        PackedStream::Rgba5658(bytes)
    } else {
        let pixels = image.to_rgb8();
        let mut words = Vec::with_capacity(geometry.pixel_count() as usize);
        for (x, y) in geometry.coords() {
            let p = pixels.get_pixel(x, y);
            words.push(pack_rgb565(p[0], p[1], p[2]));
        }
        assert_eq!(
            words.len(),
            geometry.pixel_count() as usize,
            "packed stream length mismatch"
        );
        PackedStream::Rgb565(words)
    }
}
