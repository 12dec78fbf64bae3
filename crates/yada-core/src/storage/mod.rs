//! # Storage Module
//!
//! Line-oriented persistence for catalogs.
//!
//! The catalog never touches files directly. It reads and writes whole
//! line sequences through the [`LineStore`] trait:
//! - [`FileStore`]: a text file on disk, replaced atomically on write
//! - [`MemoryStore`]: an in-memory line buffer for tests and dry runs

mod file_store;

pub use file_store::FileStore;

use crate::YadaError;

// =============================================================================
// LINESTORE TRAIT
// =============================================================================

/// Reads and writes the raw lines of a catalog.
///
/// Implementations do no parsing: comments and blank lines are passed
/// through as they are.
pub trait LineStore {
    /// Read every line in order.
    ///
    /// Returns `YadaError::Persistence` if the store cannot be opened.
    fn read_lines(&self) -> Result<Vec<String>, YadaError>;

    /// Replace the store contents with `lines`.
    ///
    /// Returns `YadaError::Persistence` if the store cannot be written.
    fn write_lines(&mut self, lines: &[String]) -> Result<(), YadaError>;

    /// Human-readable location, used in log messages.
    fn location(&self) -> String;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// A store that keeps its lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    lines: Vec<String>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with lines.
    #[must_use]
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            read_only: false,
        }
    }

    /// Make every write fail, as a store on a read-only medium would.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// The lines currently held.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl LineStore for MemoryStore {
    fn read_lines(&self) -> Result<Vec<String>, YadaError> {
        Ok(self.lines.clone())
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<(), YadaError> {
        if self.read_only {
            return Err(YadaError::Persistence(
                "memory store is read-only".to_string(),
            ));
        }
        self.lines = lines.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
