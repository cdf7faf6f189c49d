//! MKF archive reader
//!
//! MKF containers pack many variable-length sub-assets behind a leading
//! offset table. The first little-endian u32 is itself table entry 0, so
//! `firstIndex / 4 - 1` gives the number of packed sub-assets (the table
//! always carries one extra terminating entry). A nested sMKF variant,
//! used for per-sprite frame tables, stores a u16 entry count followed by
//! u16 table values that are halved offsets.
//!
//! The index holds `(begin, end)` byte ranges only; it never copies bytes
//! out of the source buffer.

use crate::common::{read_u16_le, read_u32_le, PalError, Result};
use log::{debug, trace};

/// Byte range of one sub-asset inside its parent buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Offset of the first byte of the sub-asset
    pub begin: usize,
    /// Offset one past the last byte of the sub-asset
    pub end: usize,
}

impl ArchiveEntry {
    /// Length of the sub-asset in bytes
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the sub-asset is zero-length
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Parsed offset index of an MKF or sMKF container
///
/// Constructed once per parse call from an immutable source buffer and
/// never mutated. Empty table slots (`begin == 0`, `begin >= len`, or
/// `begin == end`) are dropped during parsing, so every entry held here
/// satisfies `0 < begin < end <= len`.
#[derive(Debug, Clone, Default)]
pub struct ArchiveIndex {
    entries: Vec<ArchiveEntry>,
}

impl ArchiveIndex {
    /// Parse a top-level MKF offset table
    ///
    /// Fails with [`PalError::MalformedArchive`] when the derived entry
    /// count is negative, when the offset table would read past the buffer
    /// end, or when a non-empty entry is geometrically invalid
    /// (`begin > end` or `end > len`) — those indicate a wrong archive
    /// type or truncated input rather than an absent sub-asset.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let first_index = read_u32_le(buf, 0)? as usize;
        // The table always ends with one terminating entry.
        let count = (first_index / 4)
            .checked_sub(1)
            .ok_or_else(|| PalError::MalformedArchive {
                reason: format!("first table entry {first_index} implies a negative entry count"),
            })?;

        let table_bytes = (count + 1) * 4;
        if table_bytes > buf.len() {
            return Err(PalError::MalformedArchive {
                reason: format!(
                    "offset table of {} entries needs {table_bytes} bytes, buffer has {}",
                    count + 1,
                    buf.len()
                ),
            });
        }

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let begin = read_u32_le(buf, i * 4)? as usize;
            let end = read_u32_le(buf, (i + 1) * 4)? as usize;
            if let Some(entry) = Self::accept(begin, end, buf.len(), i)? {
                entries.push(entry);
            }
        }

        debug!(
            "parsed MKF index: {} table slots, {} usable entries",
            count,
            entries.len()
        );
        Ok(Self { entries })
    }

    /// Parse a nested sMKF frame table
    ///
    /// The variant stores a leading u16 entry count and u16 table values;
    /// each value is an offset divided by two. Empty-slot and geometry
    /// rules match [`ArchiveIndex::parse`].
    pub fn parse_nested(buf: &[u8]) -> Result<Self> {
        let count = read_u16_le(buf, 0)? as usize;

        let table_bytes = 2 + (count + 1) * 2;
        if table_bytes > buf.len() {
            return Err(PalError::MalformedArchive {
                reason: format!(
                    "frame table of {} entries needs {table_bytes} bytes, buffer has {}",
                    count + 1,
                    buf.len()
                ),
            });
        }

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let begin = read_u16_le(buf, 2 + i * 2)? as usize * 2;
            let end = read_u16_le(buf, 2 + (i + 1) * 2)? as usize * 2;
            if let Some(entry) = Self::accept(begin, end, buf.len(), i)? {
                entries.push(entry);
            }
        }

        debug!(
            "parsed sMKF index: {} table slots, {} usable entries",
            count,
            entries.len()
        );
        Ok(Self { entries })
    }

    /// Classify one table slot: skip, accept, or reject the whole archive.
    fn accept(
        begin: usize,
        end: usize,
        buf_len: usize,
        slot: usize,
    ) -> Result<Option<ArchiveEntry>> {
        // Absent sub-assets are normal in real archives, never an error.
        if begin == 0 || begin >= buf_len || begin == end {
            trace!("skipping empty slot {slot}: [{begin}, {end})");
            return Ok(None);
        }
        if begin > end || end > buf_len {
            return Err(PalError::MalformedArchive {
                reason: format!("slot {slot} spans [{begin}, {end}) in a {buf_len}-byte buffer"),
            });
        }
        Ok(Some(ArchiveEntry { begin, end }))
    }

    /// Number of usable (non-empty) entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive yielded no usable entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at position `i`, if any
    pub fn get(&self, i: usize) -> Option<ArchiveEntry> {
        self.entries.get(i).copied()
    }

    /// Iterate over all usable entries in table order
    pub fn iter(&self) -> impl Iterator<Item = ArchiveEntry> + '_ {
        self.entries.iter().copied()
    }

    /// Slice entry `i` out of the parent buffer the index was parsed from
    ///
    /// Returns `None` when `i` is out of range or when `buf` is shorter
    /// than the buffer the index was built against.
    pub fn entry_bytes<'a>(&self, buf: &'a [u8], i: usize) -> Option<&'a [u8]> {
        let entry = self.get(i)?;
        buf.get(entry.begin..entry.end)
    }
}

/// Convenience wrapper: parse a top-level MKF offset table
pub fn read_archive(buf: &[u8]) -> Result<ArchiveIndex> {
    ArchiveIndex::parse(buf)
}

/// Convenience wrapper: parse a nested sMKF frame table
pub fn read_sub_archive(buf: &[u8]) -> Result<ArchiveIndex> {
    ArchiveIndex::parse_nested(buf)
}
