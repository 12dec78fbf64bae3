//! # Formats Module
//!
//! The delimited text line format for food records.
//!
//! This is a pure transformation layer: reading and writing whole files is
//! the job of the `storage` module.

mod line;

pub use line::*;
