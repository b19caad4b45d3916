//! # Naming and Path Resolution
//!
//! Table names, migration file names and output directory templates.
//!
//! The table name used inside the generated code and the table name used in
//! the migration file name follow different rules: the code honours an
//! explicit `tableName`, the file name is always derived from the model name.

use chrono::NaiveDateTime;
use scaffolder_ir::ScaffolderConfig;
use std::path::{Path, PathBuf};

/// Timestamp format of migration file names
pub const MIGRATION_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// Table name for the generated code: lowercase `tableName` when set,
/// otherwise the lowercase model name with an `s` appended.
pub fn resolve_table_name(config: &ScaffolderConfig, model_name: &str) -> String {
    match config.table_name() {
        Some(table) => table.to_lowercase(),
        None => format!("{}s", model_name).to_lowercase(),
    }
}

/// `YYYY_MM_DD_HHMMSS_create_<model>s_table<ext>`
pub fn migration_file_name(timestamp: &NaiveDateTime, model_name: &str, extension: &str) -> String {
    format!(
        "{}_create_{}s_table{}",
        timestamp.format(MIGRATION_TIMESTAMP_FORMAT),
        model_name.to_lowercase(),
        extension
    )
}

// ============================================================================
// PathResolver
// ============================================================================

/// Resolves output path templates against a project base path.
///
/// Supported tokens: `{{base_path}}`, `{{app_path}}` (`<base>/app`),
/// `{{database_path}}` (`<base>/database`) and `{{storage_path}}`
/// (`<base>/storage`). A template that resolves to a relative path is joined
/// onto the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_path: PathBuf,
}

impl PathResolver {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a path template to a directory
    pub fn resolve(&self, template: &str) -> PathBuf {
        let base = self.base_path.to_string_lossy();
        let base = base.trim_end_matches(['/', '\\']);

        let resolved = template
            .replace("{{base_path}}", base)
            .replace("{{app_path}}", &format!("{}/app", base))
            .replace("{{database_path}}", &format!("{}/database", base))
            .replace("{{storage_path}}", &format!("{}/storage", base));

        let path = PathBuf::from(resolved);
        if path.is_absolute() {
            path
        } else {
            self.base_path.join(path)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
