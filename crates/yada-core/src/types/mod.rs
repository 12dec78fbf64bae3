//! # Core Type Definitions
//!
//! Shared types for the YADA catalog engine:
//! - Error type (`YadaError`)
//! - Search mode for keyword queries (`SearchMode`)
//! - Deferred composition references captured during load (`CompositionRef`)
//! - Load diagnostics (`LoadReport`, `LoadWarning`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// SEARCH MODE
// =============================================================================

/// How a multi-keyword search combines its keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// A food matches when it carries at least one of the keywords.
    Any,
    /// A food matches when it carries every keyword.
    All,
}

impl SearchMode {
    /// Get the mode name as used on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Any => "any",
            SearchMode::All => "all",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = YadaError;

    /// Accepts `any`/`all` in any case, plus the single letters `a`/`l`
    /// used by the old interactive menu.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "a" => Ok(SearchMode::Any),
            "all" | "l" => Ok(SearchMode::All),
            other => Err(YadaError::Parse(format!(
                "unknown search mode '{}' (use: any, all)",
                other
            ))),
        }
    }
}

// =============================================================================
// DEFERRED COMPOSITION REFERENCE
// =============================================================================

/// A composite's identifier plus the ordered identifiers of its components,
/// captured while a record file is being read and resolved only after every
/// line is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionRef {
    /// Identifier of the composite food.
    pub identifier: String,
    /// Component identifiers in file order.
    pub component_ids: Vec<String>,
}

impl CompositionRef {
    /// Create a new composition reference.
    #[must_use]
    pub fn new(identifier: impl Into<String>, component_ids: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            component_ids,
        }
    }
}

// =============================================================================
// LOAD DIAGNOSTICS
// =============================================================================

/// A recoverable problem encountered while loading a catalog.
///
/// None of these abort a load: the offending line or relation is skipped
/// and the rest of the file is still processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// The backing store could not be read; the catalog was left empty.
    StoreUnavailable { reason: String },
    /// A line could not be decoded and was skipped.
    Unparseable { line: usize, reason: String },
    /// A later line reused an identifier and replaced the earlier record.
    DuplicateIdentifier { line: usize, identifier: String },
    /// A composite listed a component that is not in the catalog.
    ComponentNotFound { composite: String, component: String },
    /// A composite line is flagged but lists no components.
    EmptyComposition { composite: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::StoreUnavailable { reason } => {
                write!(f, "could not read catalog store: {}", reason)
            }
            LoadWarning::Unparseable { line, reason } => {
                write!(f, "line {}: skipped unparseable record ({})", line, reason)
            }
            LoadWarning::DuplicateIdentifier { line, identifier } => write!(
                f,
                "line {}: identifier '{}' redefined, earlier record replaced",
                line, identifier
            ),
            LoadWarning::ComponentNotFound {
                composite,
                component,
            } => write!(
                f,
                "component '{}' not found for composite food '{}'",
                component, composite
            ),
            LoadWarning::EmptyComposition { composite } => {
                write!(f, "composite food '{}' lists no components", composite)
            }
        }
    }
}

/// Outcome of `Catalog::load`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Number of records in the catalog after loading.
    pub loaded: usize,
    /// Number of deferred composition references that resolved.
    pub composites_resolved: usize,
    /// Everything that was skipped along the way, in encounter order.
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// Check whether the load completed without any warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the YADA catalog engine.
///
/// Targeted operations return these; bulk loading reports per-record
/// problems as [`LoadWarning`] values instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum YadaError {
    /// A stored line could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A composite references a food that is not in the catalog.
    #[error("Component '{0}' not found")]
    ComponentNotFound(String),

    /// A food with this identifier already exists.
    #[error("Food with name '{0}' already exists")]
    DuplicateIdentifier(String),

    /// A composite food was requested with no components.
    #[error("Cannot create composite food '{0}' with no components")]
    EmptyComposition(String),

    /// The backing store could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The requested food is not in the catalog.
    #[error("Food '{0}' not found")]
    NotFound(String),

    /// The food cannot be stored (empty identifier or delimiter characters).
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Calories and keywords of a composite food are derived from its
    /// components and cannot be set directly.
    #[error("Calories and keywords of composite food '{0}' are derived from its components")]
    DerivedValue(String),
}

// =============================================================================
// TESTS
// =============================================================================
