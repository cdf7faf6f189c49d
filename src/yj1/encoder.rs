//! Single-block YJ_1 encoder
//!
//! Produces blobs the decoder accepts, using only run and literal
//! opcodes. Back-references are never emitted; the game's own tooling
//! is the sole authority on those, and runs plus literals already give
//! an exact inverse of the decode grammar. Used for fixture generation
//! and round-trip testing.

use super::{MAX_LITERAL, MAX_RUN, MIN_RUN};
use crate::common::{OP_RUN, YJ1_HEADER_SIZE, YJ1_SIGNATURE};

/// Compress `data` into a one-block YJ_1 blob
///
/// The output always decodes back to `data` exactly. Infallible: every
/// byte sequence, including the empty one, has an encoding.
pub fn compress_bytes(data: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let run = run_length_at(data, i);
        if run >= MIN_RUN {
            payload.push(OP_RUN | (run - MIN_RUN) as u8);
            payload.push(data[i]);
            i += run;
        } else {
            let start = i;
            // Literal chunk: until the next encodable run or the opcode limit.
            while i < data.len() && i - start < MAX_LITERAL && run_length_at(data, i) < MIN_RUN {
                i += 1;
            }
            payload.push((i - start - 1) as u8);
            payload.extend_from_slice(&data[start..i]);
        }
    }

    let blob_len = YJ1_HEADER_SIZE + 4 + payload.len();
    let mut blob = Vec::with_capacity(blob_len);
    blob.extend_from_slice(&YJ1_SIGNATURE);
    blob.extend_from_slice(&(data.len() as u32).to_le_bytes());
    blob.extend_from_slice(&(blob_len as u32).to_le_bytes());
    blob.extend_from_slice(&1u32.to_le_bytes());
    blob.extend_from_slice(&0u32.to_le_bytes());
    blob.extend_from_slice(&((YJ1_HEADER_SIZE + 4) as u32).to_le_bytes());
    blob.extend_from_slice(&payload);
    blob
}

/// Length of the byte run starting at `i`, capped at [`MAX_RUN`].
fn run_length_at(data: &[u8], i: usize) -> usize {
    let value = data[i];
    data[i..]
        .iter()
        .take(MAX_RUN)
        .take_while(|&&b| b == value)
        .count()
}
