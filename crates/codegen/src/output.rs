//! # Output Stores
//!
//! Where compiled migrations end up. The filesystem store creates missing
//! parent directories; the memory store records writes for inspection.

use scaffolder_core::{ScaffoldError, ScaffoldResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Destination for generated files
pub trait OutputStore {
    /// Create or replace the file at `path`
    fn put(&mut self, path: &Path, content: &str) -> ScaffoldResult<()>;
}

// ============================================================================
// FsOutputStore
// ============================================================================

/// Writes files to disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOutputStore;

impl OutputStore for FsOutputStore {
    fn put(&mut self, path: &Path, content: &str) -> ScaffoldResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| ScaffoldError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// MemoryOutputStore
// ============================================================================

/// Keeps written files in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryOutputStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryOutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written to `path`, if any
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All written paths, sorted
    pub fn paths(&self) -> Vec<&Path> {
        self.files.keys().map(PathBuf::as_path).collect()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl OutputStore for MemoryOutputStore {
    fn put(&mut self, path: &Path, content: &str) -> ScaffoldResult<()> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
