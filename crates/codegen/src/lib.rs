//! # Scaffolder Codegen
//!
//! Migration compiler for the scaffolder.
//!
//! This crate turns a model's field list into a schema-builder migration
//! file, starting from a stub template.
//!
//! ## Features
//!
//! - **Templates**: `{{placeholder}}` substitution over stub files
//! - **Field Directives**: column statements with modifiers, indexes and foreign keys
//! - **Extensions**: ordered post-processing hooks over the compiled text
//! - **Cache**: content-addressed cache that skips recompiling unchanged migrations
//! - **Naming**: table names, path templates and timestamped file names
//!

// ============================================================================
// Modules
// ============================================================================

pub mod cache;
pub mod clock;
pub mod extension;
pub mod fingerprint;
pub mod migrations;
pub mod naming;
pub mod output;
pub mod template;

// ============================================================================
// Re-exports
// ============================================================================

pub use cache::{CacheKey, CacheStore, FsCacheStore, MemoryCacheStore};
pub use clock::MigrationClock;
pub use extension::{MigrationExtension, SoftDeletes, apply_extensions};
pub use fingerprint::fingerprint;
pub use migrations::{CompiledArtifact, MigrationCompiler, render_migration, synthesize_fields};
pub use naming::{PathResolver, migration_file_name, resolve_table_name};
pub use output::{FsOutputStore, MemoryOutputStore, OutputStore};
pub use template::{Placeholders, Stub, substitute};

use std::path::PathBuf;

/// Default cache directory, relative to the base path
pub const DEFAULT_CACHE_DIR: &str = "scaffolder-config/cache";

/// Default cache file extension
pub const DEFAULT_CACHE_EXTENSION: &str = ".scf";

/// Default extension of generated migration files
pub const DEFAULT_SOURCE_EXTENSION: &str = ".php";

// ============================================================================
// CompilerConfig
// ============================================================================

/// Configuration for the migration compiler
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Project root; path templates and the cache directory resolve against it
    pub base_path: PathBuf,

    /// Cache directory (relative paths are joined onto `base_path`)
    pub cache_dir: PathBuf,

    /// Extension of cache entries
    pub cache_extension: String,

    /// Extension of generated migration files
    pub source_extension: String,

    /// Indentation level of the generated column statements
    pub indent_level: usize,

    /// Seconds the migration clock advances per compile
    pub step_seconds: i64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_extension: DEFAULT_CACHE_EXTENSION.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            indent_level: 3,
            step_seconds: 5,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Set the cache entry extension (including the dot)
    pub fn with_cache_extension(mut self, ext: impl Into<String>) -> Self {
        self.cache_extension = ext.into();
        self
    }

    /// Set the migration file extension (including the dot)
    pub fn with_source_extension(mut self, ext: impl Into<String>) -> Self {
        self.source_extension = ext.into();
        self
    }

    /// Get the resolved cache directory
    pub fn cache_path(&self) -> PathBuf {
        if self.cache_dir.is_absolute() {
            self.cache_dir.clone()
        } else {
            self.base_path.join(&self.cache_dir)
        }
    }

    /// Get a path resolver rooted at `base_path`
    pub fn path_resolver(&self) -> PathResolver {
        PathResolver::new(&self.base_path)
    }
}

// ============================================================================
// Tests
// ============================================================================
