//! # System Module
//!
//! Catalog metrics.
//!
//! Pure, read-only summaries of a catalog, used by the status views of the
//! front end. Nothing here mutates or gates catalog operations.

mod metrics;

pub use metrics::*;
