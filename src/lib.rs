//! palasset - decoder for PAL DOS game assets
//!
//! This crate decodes the proprietary binary assets of a 1990s DOS RPG:
//! MKF offset-indexed containers, the YJ_1 block compression scheme, 6-bit
//! VGA palette tables, and RLE-encoded indexed sprite frames. Everything
//! is a pure function from an immutable input buffer to an owned output
//! buffer; the crate performs no I/O and holds no shared state, so
//! independent decode calls are trivially safe to run in parallel.
//!
//! The usual pipeline, left to right:
//!
//! archive bytes → [`read_archive`] → entry slice → (if tagged)
//! [`decompress_bytes`] → [`decode_pixels`] with a [`Palette`] → raster.
//!
//! Bounds policy: structural problems (bad offset tables, wrong
//! signatures, truncated headers) are hard errors, but indices that land
//! outside a buffer *inside* accepted data — back-reference sources,
//! palette bytes past the file end — read as zero. Real asset dumps
//! contain small generation artifacts, and a batch decode must survive
//! them.
//!
//! # Example
//!
//! ```
//! use palasset::{compress_bytes, decompress_bytes, decode_pixels};
//! use palasset::{FrameDimensions, Palette, PixelFormat};
//!
//! // Round-trip a frame through the YJ_1 grammar.
//! let frame = vec![0x81u8, 1, 0x00, 2]; // RLE: two pixels of 1, one of 2
//! let blob = compress_bytes(&frame);
//! assert_eq!(decompress_bytes(&blob)?, frame);
//!
//! // Rasterize it with an all-black palette.
//! let palette = Palette::default();
//! let raster = decode_pixels(&frame, &palette, FrameDimensions::new(3, 1), PixelFormat::Rgba);
//! assert_eq!(raster.len(), 3 * 4);
//! # Ok::<(), palasset::PalError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod archive;
pub mod common;
pub mod error;
pub mod palette;
pub mod sprite;
pub mod yj1;

// Re-export commonly used types
pub use archive::{read_archive, read_sub_archive, ArchiveEntry, ArchiveIndex};
pub use common::{PalError, Result, PALETTE_COLORS, PALETTE_SLOT_SIZE, YJ1_SIGNATURE};
pub use palette::{load_palette, Palette};
pub use sprite::{decode_pixels, DimensionSource, FixedDimensions, FrameDimensions, PixelFormat};
pub use yj1::{compress_bytes, decompress_bytes, has_signature, Yj1Header};
