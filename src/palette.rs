//! VGA palette loading
//!
//! Palette files (PAT.MKF sub-assets) hold one or more 768-byte slots of
//! 256 RGB triples with 6-bit components, the native VGA DAC range. Each
//! component is widened to 8 bits by bit replication, `(v << 2) | (v >> 4)`,
//! which maps 0x3F to exactly 0xFF; plain multiplication would not.

use crate::common::{PALETTE_COLORS, PALETTE_SLOT_SIZE};

/// One loaded palette: 256 RGB triples, already widened to 8 bits
///
/// Loaded once per palette slot and shared by reference across all pixel
/// decode calls that use it.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [[u8; 3]; PALETTE_COLORS],
}

impl Palette {
    /// Load the palette at `slot` from a raw palette table
    ///
    /// Reads 768 bytes starting at `slot * 768`. Bytes past the end of
    /// `buf` read as 0 (black); palette files are often shorter than
    /// their nominal multi-slot capacity and that must not be an error.
    pub fn load(buf: &[u8], slot: usize) -> Self {
        let base = slot.saturating_mul(PALETTE_SLOT_SIZE);
        let mut colors = [[0u8; 3]; PALETTE_COLORS];
        for (i, color) in colors.iter_mut().enumerate() {
            for (c, component) in color.iter_mut().enumerate() {
                let v = buf.get(base + i * 3 + c).copied().unwrap_or(0);
                *component = expand_6bit(v);
            }
        }
        Self { colors }
    }

    /// Build a palette from already-widened 8-bit RGB triples
    ///
    /// For callers that carry their own color tables instead of loading
    /// a 6-bit palette file.
    pub fn from_rgb(colors: [[u8; 3]; PALETTE_COLORS]) -> Self {
        Self { colors }
    }

    /// The widened RGB triple for a palette index
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }
}

impl Default for Palette {
    /// All-black palette
    fn default() -> Self {
        Self {
            colors: [[0; 3]; PALETTE_COLORS],
        }
    }
}

/// Widen a 6-bit VGA component to 8 bits by bit replication.
#[inline]
fn expand_6bit(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Convenience wrapper matching the decode pipeline's entry points
pub fn load_palette(buf: &[u8], slot: usize) -> Palette {
    Palette::load(buf, slot)
}
