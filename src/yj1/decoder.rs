//! Block-wise YJ_1 decompression
//!
//! Each block is decoded independently against a shared output buffer.
//! Back-reference copies read from the already-produced output, so an
//! overlapping copy re-reads bytes it has just written; a source index
//! before the start of the output reads as zero. Both behaviors are
//! required by real asset files and must not be tightened.

use super::Yj1Header;
use crate::common::{read_u32_le, PalError, Result, OP_COPY, OP_RUN, YJ1_HEADER_SIZE};
use log::debug;

/// Decompress a YJ_1 blob into its original byte stream
///
/// The output length equals the header's `uncompressed_length` for every
/// well-formed blob. Decoding stops early once that target is reached,
/// even if block payload remains.
///
/// # Errors
///
/// [`PalError::BadSignature`] when the leading tag is not `YJ_1`,
/// [`PalError::TruncatedInput`] when the header or block offset table is
/// short, and [`PalError::TruncatedBlock`] when an opcode's operands
/// cross a block boundary.
pub fn decompress_bytes(blob: &[u8]) -> Result<Vec<u8>> {
    let header = Yj1Header::parse(blob)?;
    let target = header.uncompressed_length as usize;
    let block_count = header.block_count as usize;

    let table_end = YJ1_HEADER_SIZE + block_count * 4;
    if table_end > blob.len() {
        return Err(PalError::TruncatedInput {
            expected: table_end,
            available: blob.len(),
        });
    }

    let mut offsets = Vec::with_capacity(block_count);
    for i in 0..block_count {
        offsets.push(read_u32_le(blob, YJ1_HEADER_SIZE + i * 4)? as usize);
    }

    let mut out = Vec::with_capacity(target);
    for (i, &start) in offsets.iter().enumerate() {
        if out.len() >= target {
            break;
        }
        let end = if i + 1 < block_count {
            offsets[i + 1]
        } else {
            blob.len()
        };
        // Offsets pointing outside the blob clamp to its end; a block with
        // nothing inside it simply contributes no output.
        let end = end.min(blob.len());
        let start = start.min(end);
        decode_block(blob, start, end, i, target, &mut out)?;
    }

    debug!(
        "decompressed {} blocks: {} -> {} bytes (target {target})",
        block_count,
        blob.len(),
        out.len()
    );
    Ok(out)
}

/// Decode one block's opcodes into `out`, stopping at the block boundary
/// or once `out` reaches `target` bytes, whichever comes first.
fn decode_block(
    input: &[u8],
    mut pos: usize,
    end: usize,
    block: usize,
    target: usize,
    out: &mut Vec<u8>,
) -> Result<()> {
    while pos < end && out.len() < target {
        let op = input[pos];
        pos += 1;

        if op & OP_RUN != 0 {
            // Run: repeat the next byte (low 7 bits + 3) times.
            let count = ((op & 0x7F) as usize) + 3;
            if pos >= end {
                return Err(PalError::TruncatedBlock { block });
            }
            let value = input[pos];
            pos += 1;
            let n = count.min(target - out.len());
            out.resize(out.len() + n, value);
        } else if op & OP_COPY != 0 {
            // Back-reference: copy (low 6 bits + 3) bytes from the output
            // itself, a little-endian u16 distance behind the write head.
            let count = ((op & 0x3F) as usize) + 3;
            if pos + 2 > end {
                return Err(PalError::TruncatedBlock { block });
            }
            let distance = u16::from_le_bytes([input[pos], input[pos + 1]]) as usize;
            pos += 2;
            let base = out.len() as isize - distance as isize;
            let n = count.min(target - out.len());
            for j in 0..n as isize {
                let src = base + j;
                let byte = if src >= 0 {
                    out.get(src as usize).copied().unwrap_or(0)
                } else {
                    0
                };
                out.push(byte);
            }
        } else {
            // Literal: copy (value + 1) raw bytes from the input.
            let count = (op as usize) + 1;
            if pos + count > end {
                return Err(PalError::TruncatedBlock { block });
            }
            let n = count.min(target - out.len());
            out.extend_from_slice(&input[pos..pos + n]);
            pos += count;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(uncompressed: u32, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"YJ_1");
        buf.extend_from_slice(&uncompressed.to_le_bytes());
        buf.extend_from_slice(&((24 + payload.len()) as u32).to_le_bytes());
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&24u32.to_le_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn test_literal_opcode() {
        let out = decompress_bytes(&blob(4, &[0x03, 10, 20, 30, 40])).unwrap();
        assert_eq!(out, &[10, 20, 30, 40]);
    }

    #[test]
    fn test_run_opcode() {
        // 0x82: run of (2 + 3) = 5 copies of 0xAB.
        let out = decompress_bytes(&blob(5, &[0x82, 0xAB])).unwrap();
        assert_eq!(out, &[0xAB; 5]);
    }

    #[test]
    fn test_run_clamps_to_target() {
        let out = decompress_bytes(&blob(3, &[0x8F, 0xCD])).unwrap();
        assert_eq!(out, &[0xCD; 3]);
    }

    #[test]
    fn test_back_reference_copy() {
        // Literal "abc", then copy 3 bytes from distance 3.
        let out = decompress_bytes(&blob(6, &[0x02, b'a', b'b', b'c', 0x40, 3, 0])).unwrap();
        assert_eq!(out, b"abcabc");
    }

    #[test]
    fn test_overlapping_copy_expands() {
        // Distance 1, length 5: classic LZ77 self-extension of one byte.
        let out = decompress_bytes(&blob(6, &[0x00, b'x', 0x42, 1, 0])).unwrap();
        assert_eq!(out, b"xxxxxx");
    }

    #[test]
    fn test_copy_before_output_start_reads_zero() {
        // Distance 10 with only 1 byte produced: every source index falls
        // before the output start and reads as zero.
        let out = decompress_bytes(&blob(4, &[0x00, 7, 0x40, 10, 0])).unwrap();
        assert_eq!(out, &[7, 0, 0, 0]);
    }

    #[test]
    fn test_truncated_run_operand() {
        let err = decompress_bytes(&blob(5, &[0x82])).unwrap_err();
        assert!(matches!(err, PalError::TruncatedBlock { block: 0 }));
    }

    #[test]
    fn test_truncated_copy_operand() {
        let err = decompress_bytes(&blob(5, &[0x40, 1])).unwrap_err();
        assert!(matches!(err, PalError::TruncatedBlock { block: 0 }));
    }

    #[test]
    fn test_truncated_literal_operand() {
        let err = decompress_bytes(&blob(5, &[0x04, 1, 2])).unwrap_err();
        assert!(matches!(err, PalError::TruncatedBlock { block: 0 }));
    }

    #[test]
    fn test_two_blocks() {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"YJ_1");
        buf.extend_from_slice(&6u32.to_le_bytes());
        buf.extend_from_slice(&34u32.to_le_bytes());
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&28u32.to_le_bytes()); // block 0
        buf.extend_from_slice(&32u32.to_le_bytes()); // block 1
        buf.extend_from_slice(&[0x02, 1, 2, 3]); // block 0: literal x3
        buf.extend_from_slice(&[0x80, 9]); // block 1: run of 3 nines
        let out = decompress_bytes(&buf).unwrap();
        assert_eq!(out, &[1, 2, 3, 9, 9, 9]);
    }

    #[test]
    fn test_stops_at_target_with_payload_remaining() {
        let out = decompress_bytes(&blob(2, &[0x03, 1, 2, 3, 4])).unwrap();
        assert_eq!(out, &[1, 2]);
    }

    #[test]
    fn test_empty_target() {
        let out = decompress_bytes(&blob(0, &[])).unwrap();
        assert!(out.is_empty());
    }
}
