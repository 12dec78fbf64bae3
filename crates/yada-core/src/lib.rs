//! # yada-core
//!
//! The food catalog engine for YADA (Yet Another Diet Assistant).
//!
//! This crate keeps a catalog of food records. A record is either basic
//! (authoritative calories and keywords) or composite (calories summed and
//! keywords unioned from copies of its components). Catalogs persist as
//! delimited text lines and are queried by keyword.
//!
//! ## Layout
//!
//! - `food`: the record type and its aggregation rules
//! - `formats`: the record line codec
//! - `storage`: the `LineStore` trait with file and in-memory stores
//! - `catalog`: load and two-pass resolution, mutations, keyword queries
//! - `system`: read-only catalog metrics
//!
//! ## Architectural Constraints
//!
//! - Synchronous, single-threaded, no network
//! - Composites own copies of their components, never shared references
//! - Loading never fails as a whole; per-line problems become warnings

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod food;
pub mod formats;
pub mod primitives;
pub mod storage;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CompositionRef, LoadReport, LoadWarning, SearchMode, YadaError};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::Catalog;
pub use food::Food;
pub use storage::{FileStore, LineStore, MemoryStore};
pub use system::CatalogMetrics;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{composition_ref_from_line, food_from_line, food_to_line};
