//! # Compilation Cache
//!
//! Compiled migrations are cached under a key derived from a caller-supplied
//! content hash (`migration_<hash><ext>`). A cached entry is served verbatim
//! on every later compile with the same hash.
//!
//! Entries are never invalidated here. A caller that changes what a model
//! compiles to must supply a different hash, or clear the cache.

use scaffolder_core::{ScaffoldError, ScaffoldResult};
use std::collections::BTreeMap;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Prefix of migration cache entries
pub const MIGRATION_PREFIX: &str = "migration_";

/// Marks a hash stored hex-encoded because it had characters unsafe in a file name
const ENCODED_MARKER: char = '~';

// ============================================================================
// CacheKey
// ============================================================================

/// Key of a cache entry (also its file name on disk)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build the key for a migration hash.
    ///
    /// Hashes made of ASCII letters, digits, `-` and `_` are used verbatim.
    /// Any other hash (base64 digests, paths) is hex-encoded behind a `~`
    /// marker, so distinct hashes keep distinct keys and no key can escape
    /// the cache directory. The hash must be non-empty.
    pub fn migration(hash: &str, extension: &str) -> ScaffoldResult<Self> {
        if hash.is_empty() {
            return Err(ScaffoldError::validation("Content hash cannot be empty"));
        }

        let is_safe = hash
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        let stem = if is_safe {
            hash.to_string()
        } else {
            format!("{}{}", ENCODED_MARKER, hex::encode(hash))
        };

        Ok(Self(format!("{}{}{}", MIGRATION_PREFIX, stem, extension)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CacheStore
// ============================================================================

/// Durable key-value store for compiled migrations
pub trait CacheStore {
    /// Check whether an entry exists
    fn exists(&self, key: &CacheKey) -> ScaffoldResult<bool>;

    /// Read an entry
    fn read(&self, key: &CacheKey) -> ScaffoldResult<String>;

    /// Create or replace an entry
    fn write(&mut self, key: &CacheKey, content: &str) -> ScaffoldResult<()>;

    /// List the migration entries, sorted by key
    fn entries(&self) -> ScaffoldResult<Vec<CacheKey>>;

    /// Remove every migration entry; returns how many were removed
    fn clear(&mut self) -> ScaffoldResult<usize>;
}

// ============================================================================
// FsCacheStore
// ============================================================================

/// Cache stored as one file per entry in a directory
#[derive(Debug, Clone)]
pub struct FsCacheStore {
    root: PathBuf,
}

impl FsCacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing an entry
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

impl CacheStore for FsCacheStore {
    fn exists(&self, key: &CacheKey) -> ScaffoldResult<bool> {
        Ok(self.entry_path(key).is_file())
    }

    fn read(&self, key: &CacheKey) -> ScaffoldResult<String> {
        let path = self.entry_path(key);
        if !path.is_file() {
            return Err(ScaffoldError::CacheMiss(key.to_string()));
        }

        std::fs::read_to_string(&path).map_err(|e| ScaffoldError::CacheRead {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn write(&mut self, key: &CacheKey, content: &str) -> ScaffoldResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| ScaffoldError::DirectoryCreate {
            path: self.root.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(self.entry_path(key), content).map_err(|e| ScaffoldError::CacheWrite {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn entries(&self) -> ScaffoldResult<Vec<CacheKey>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ScaffoldError::CacheRead {
                key: self.root.display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name.starts_with(MIGRATION_PREFIX) {
                keys.push(CacheKey(name.into_owned()));
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn clear(&mut self) -> ScaffoldResult<usize> {
        let keys = self.entries()?;
        for key in &keys {
            std::fs::remove_file(self.entry_path(key)).map_err(|e| ScaffoldError::CacheWrite {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        }

        tracing::info!(removed = keys.len(), cache = %self.root.display(), "cache cleared");
        Ok(keys.len())
    }
}

// ============================================================================
// MemoryCacheStore
// ============================================================================

/// In-memory cache, for dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    entries: BTreeMap<CacheKey, String>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn exists(&self, key: &CacheKey) -> ScaffoldResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn read(&self, key: &CacheKey) -> ScaffoldResult<String> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| ScaffoldError::CacheMiss(key.to_string()))
    }

    fn write(&mut self, key: &CacheKey, content: &str) -> ScaffoldResult<()> {
        self.entries.insert(key.clone(), content.to_string());
        Ok(())
    }

    fn entries(&self) -> ScaffoldResult<Vec<CacheKey>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn clear(&mut self) -> ScaffoldResult<usize> {
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }
}

// ============================================================================
// Tests
// ============================================================================
