//! Error handling for PAL asset decoding
//!
//! This module re-exports the error types used throughout the crate.
//! The core policy: structural inconsistencies (bad offset tables, missing
//! signatures, truncated headers) are hard errors; out-of-range indices
//! inside already-accepted data (back-reference sources, palette lookups)
//! silently resolve to zero, tolerating the small generation artifacts
//! known to exist in real asset dumps.

pub use crate::common::PalError;
pub use crate::common::Result;
