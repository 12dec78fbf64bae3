//! # File Store
//!
//! A catalog kept in a plain text file.
//!
//! Writes go to a sibling `*.tmp` file which is then renamed over the
//! destination, so a failed save never leaves a half-written catalog.

use super::LineStore;
use crate::YadaError;
use crate::primitives::MAX_STORE_FILE_SIZE;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// A line store backed by a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the file at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("catalog"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LineStore for FileStore {
    fn read_lines(&self) -> Result<Vec<String>, YadaError> {
        let metadata = fs::metadata(&self.path).map_err(|e| {
            YadaError::Persistence(format!(
                "Could not open '{}' for reading: {}",
                self.path.display(),
                e
            ))
        })?;

        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(YadaError::Persistence(format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_STORE_FILE_SIZE
            )));
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            YadaError::Persistence(format!("Read '{}': {}", self.path.display(), e))
        })?;

        Ok(contents.lines().map(str::to_string).collect())
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<(), YadaError> {
        let mut contents = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, contents).map_err(|e| {
            // A partial temp file is never read back.
            let _ = fs::remove_file(&temp_path);
            YadaError::Persistence(format!(
                "Could not open '{}' for writing: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            // Best effort: the temp file is garbage once the rename failed.
            let _ = fs::remove_file(&temp_path);
            YadaError::Persistence(format!(
                "Could not replace '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
