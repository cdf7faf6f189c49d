//! Common types and constants for the PAL asset decoding core
//!
//! This module defines the error type, result alias, and the format
//! constants shared by the archive reader, the YJ_1 decompressor, the
//! palette loader and the sprite decoder.

use thiserror::Error;

/// Error type for asset decoding operations
#[derive(Debug, Error)]
pub enum PalError {
    /// Archive offset table is internally inconsistent
    #[error("Malformed archive: {reason}")]
    MalformedArchive {
        /// What made the offset table unusable
        reason: String,
    },

    /// Blob does not start with the recognized compression signature
    ///
    /// Callers may treat this as "data is stored uncompressed" and fall
    /// back to using the bytes as-is; that recovery path is legitimate
    /// throughout the MKF format family.
    #[error("Bad compression signature: {found:02X?} (expected \"YJ_1\")")]
    BadSignature {
        /// The four bytes found where the signature was expected
        found: [u8; 4],
    },

    /// Input ended before a declared header field or table
    #[error("Truncated input: need {expected} bytes, have {available}")]
    TruncatedInput {
        /// Bytes required to satisfy the declared structure
        expected: usize,
        /// Bytes actually available
        available: usize,
    },

    /// A block opcode requires operand bytes past the block boundary
    #[error("Truncated block {block}: opcode operands cross the block boundary")]
    TruncatedBlock {
        /// Zero-based index of the offending block
        block: usize,
    },
}

/// Result type alias for asset decoding operations
pub type Result<T> = std::result::Result<T, PalError>;

// MKF / YJ_1 format constants

/// Compression blob signature, 4 ASCII bytes
pub const YJ1_SIGNATURE: [u8; 4] = *b"YJ_1";

/// Fixed YJ_1 header size: signature + three u32 fields + one reserved u32
pub const YJ1_HEADER_SIZE: usize = 20;

/// Number of colors in one palette slot
pub const PALETTE_COLORS: usize = 256;

/// Byte size of one palette slot (256 colors x 3 components)
pub const PALETTE_SLOT_SIZE: usize = PALETTE_COLORS * 3;

/// Opcode bit selecting a run in both RLE grammars
pub const OP_RUN: u8 = 0x80;

/// Opcode bit selecting a back-reference copy in the block grammar
pub const OP_COPY: u8 = 0x40;

/// Read a little-endian u32 from `buf` at `pos`, or fail with
/// [`PalError::TruncatedInput`] when fewer than four bytes remain.
pub(crate) fn read_u32_le(buf: &[u8], pos: usize) -> Result<u32> {
    match buf.get(pos..pos + 4) {
        Some(bytes) => Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => Err(PalError::TruncatedInput {
            expected: pos + 4,
            available: buf.len(),
        }),
    }
}

/// Read a little-endian u16 from `buf` at `pos`, with the same truncation
/// behavior as [`read_u32_le`].
pub(crate) fn read_u16_le(buf: &[u8], pos: usize) -> Result<u16> {
    match buf.get(pos..pos + 2) {
        Some(bytes) => Ok(u16::from_le_bytes([bytes[0], bytes[1]])),
        None => Err(PalError::TruncatedInput {
            expected: pos + 2,
            available: buf.len(),
        }),
    }
}
