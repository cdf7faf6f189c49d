//! YJ_1 block compression
//!
//! YJ_1 is the compression scheme used by the game's MKF sub-assets. A
//! blob carries a 4-byte ASCII signature, the uncompressed length, an
//! advisory compressed length, a block count and one reserved field,
//! followed by a table of block-start offsets and the block payloads.
//! Within a block three opcode classes appear: runs, back-reference
//! copies into the already-produced output, and literal byte ranges.

mod decoder;
mod encoder;

pub use decoder::decompress_bytes;
pub use encoder::compress_bytes;

use crate::common::{read_u32_le, PalError, Result, YJ1_HEADER_SIZE, YJ1_SIGNATURE};
use log::trace;

/// Minimum repeat count encodable by a run opcode
pub const MIN_RUN: usize = 3;

/// Maximum repeat count encodable by a run opcode (`0x7F + 3`)
pub const MAX_RUN: usize = 0x7F + MIN_RUN;

/// Minimum length encodable by a back-reference copy opcode
pub const MIN_COPY: usize = 3;

/// Maximum length encodable by a back-reference copy opcode (`0x3F + 3`)
pub const MAX_COPY: usize = 0x3F + MIN_COPY;

/// Maximum byte count encodable by a literal opcode (`0x3F + 1`)
pub const MAX_LITERAL: usize = 0x40;

/// Parsed fixed-size header of a YJ_1 blob
#[derive(Debug, Clone, Copy)]
pub struct Yj1Header {
    /// Exact length of the decompressed output
    pub uncompressed_length: u32,
    /// Declared compressed length; advisory only, never trusted for bounds
    pub compressed_length: u32,
    /// Number of independently decodable blocks
    pub block_count: u32,
}

impl Yj1Header {
    /// Parse the fixed header of a YJ_1 blob
    ///
    /// Fails with [`PalError::BadSignature`] when the leading tag is not
    /// `YJ_1` (callers typically fall back to treating the bytes as
    /// stored) and with [`PalError::TruncatedInput`] when the buffer ends
    /// inside the header.
    pub fn parse(blob: &[u8]) -> Result<Self> {
        let sig = blob.get(0..4).ok_or(PalError::TruncatedInput {
            expected: 4,
            available: blob.len(),
        })?;
        if sig != YJ1_SIGNATURE {
            return Err(PalError::BadSignature {
                found: [sig[0], sig[1], sig[2], sig[3]],
            });
        }
        if blob.len() < YJ1_HEADER_SIZE {
            return Err(PalError::TruncatedInput {
                expected: YJ1_HEADER_SIZE,
                available: blob.len(),
            });
        }

        let header = Self {
            uncompressed_length: read_u32_le(blob, 4)?,
            compressed_length: read_u32_le(blob, 8)?,
            block_count: read_u32_le(blob, 12)?,
        };
        // Bytes 16..20 are reserved and ignored.

        if header.compressed_length as usize != blob.len() {
            trace!(
                "advisory compressed length {} disagrees with blob length {}",
                header.compressed_length,
                blob.len()
            );
        }
        Ok(header)
    }
}

/// Whether `buf` starts with the YJ_1 compression signature
///
/// Callers are expected to probe sub-assets with this before deciding
/// between [`decompress_bytes`] and using the bytes as-is.
pub fn has_signature(buf: &[u8]) -> bool {
    buf.len() >= 4 && buf[0..4] == YJ1_SIGNATURE
}
