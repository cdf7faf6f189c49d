//! Indexed sprite rasterization
//!
//! Decompressed sprite frames are RLE streams of palette indices: a high
//! bit flags a run of one index, otherwise the opcode counts individual
//! indices. The decoder expands them into a flat row-major, top-down
//! raster using a loaded [`Palette`].
//!
//! The byte stream carries no dimensions. The original tooling brute-
//! forced candidate sizes until a conversion "looked right"; here the
//! caller supplies [`FrameDimensions`] explicitly, optionally through a
//! [`DimensionSource`] policy, and the decoder never guesses.

use crate::common::OP_RUN;
use crate::palette::Palette;
use log::trace;

/// Caller-supplied size of one decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDimensions {
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
}

impl FrameDimensions {
    /// 320x200 full-screen size used by battle backgrounds
    pub const FULL_SCREEN: Self = Self {
        width: 320,
        height: 200,
    };

    /// Dimensions for a `width` x `height` frame
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total pixel count of the raster
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Policy supplying frame dimensions to the decoder
///
/// Sprite entries carry no embedded size, so some outside knowledge — a
/// fixed table, per-asset metadata, user input — has to provide one.
/// Orchestration layers implement this trait; the decoder only consumes
/// its answers.
pub trait DimensionSource {
    /// Dimensions for archive entry `entry`, or `None` if unknown
    fn dimensions_for(&self, entry: usize) -> Option<FrameDimensions>;
}

/// The trivial policy: every entry has the same, known size
#[derive(Debug, Clone, Copy)]
pub struct FixedDimensions(pub FrameDimensions);

impl DimensionSource for FixedDimensions {
    fn dimensions_for(&self, _entry: usize) -> Option<FrameDimensions> {
        Some(self.0)
    }
}

/// Output pixel layout of a decoded raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel, no transparency
    Rgb,
    /// 4 bytes per pixel; palette index 0 decodes as fully transparent
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel in this format
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Expand an RLE stream of palette indices into a flat raster
///
/// The raster is always exactly `width * height` pixels, row-major and
/// top-down. Input beyond what fills the raster is ignored; input that
/// runs out early leaves the remaining pixels zeroed (transparent in
/// [`PixelFormat::Rgba`]). In `Rgba`, palette index 0 writes (0,0,0,0)
/// without consulting the palette; in `Rgb` every index is looked up.
pub fn decode_pixels(
    rle: &[u8],
    palette: &Palette,
    dims: FrameDimensions,
    format: PixelFormat,
) -> Vec<u8> {
    let pixel_count = dims.pixel_count();
    let bpp = format.bytes_per_pixel();
    let mut out = vec![0u8; pixel_count * bpp];

    let mut written = 0;
    let mut pos = 0;
    while pos < rle.len() && written < pixel_count {
        let op = rle[pos];
        pos += 1;

        if op & OP_RUN != 0 {
            // Run: one index, looked up once, repeated (low 7 bits + 1) times.
            let count = ((op & 0x7F) as usize) + 1;
            let Some(&index) = rle.get(pos) else {
                break;
            };
            pos += 1;
            let pixel = lookup(palette, index, format);
            for _ in 0..count.min(pixel_count - written) {
                out[written * bpp..written * bpp + bpp].copy_from_slice(&pixel[..bpp]);
                written += 1;
            }
        } else {
            // Literal: (value + 1) indices, each one pixel.
            let count = (op as usize) + 1;
            for _ in 0..count {
                let Some(&index) = rle.get(pos) else {
                    break;
                };
                pos += 1;
                if written >= pixel_count {
                    break;
                }
                let pixel = lookup(palette, index, format);
                out[written * bpp..written * bpp + bpp].copy_from_slice(&pixel[..bpp]);
                written += 1;
            }
        }
    }

    trace!(
        "decoded {written}/{pixel_count} pixels ({}x{}, {} input bytes)",
        dims.width,
        dims.height,
        rle.len()
    );
    out
}

#[inline]
fn lookup(palette: &Palette, index: u8, format: PixelFormat) -> [u8; 4] {
    if index == 0 && format == PixelFormat::Rgba {
        return [0, 0, 0, 0];
    }
    let [r, g, b] = palette.rgb(index);
    [r, g, b, 255]
}
