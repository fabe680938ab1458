//! Utility types and functions.
//!
//! This module contains fundamental types used throughout the library:
//! - [`DataType`] - Element kinds of numeric arrays
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam

mod data_type;
mod error;
mod math;

pub use data_type::*;
pub use error::*;
pub use math::*;
