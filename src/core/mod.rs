//! Core layer - arrays, attribute collections and export bookkeeping.
//!
//! This module provides:
//! - [`DataArray`] - Typed numeric buffer with tuple structure
//! - [`DataSetAttributes`] - Named arrays with active designations
//! - [`compute_digest`] / [`hex_digest`] - Content digests
//! - [`ArchiveEntries`] - Accumulator for the files of one export

mod attributes;
mod data_array;
mod digest;
mod entries;

pub use attributes::{ArrayRef, DataSetAttributes};
pub use data_array::{ArrayValues, DataArray};
pub use digest::{compute_digest, hex_digest, BlobDigest};
pub use entries::{ArchiveEntries, ArchiveEntry};
