//! # Extension Hooks
//!
//! Extensions post-process a compiled migration before it is cached and
//! written. They run in order; each one receives the previous one's output.
//! A failing extension aborts the compile.

use scaffolder_core::{ScaffoldError, ScaffoldResult};
use scaffolder_ir::{ModelData, ScaffolderConfig};

/// A post-processing step over compiled migration text
pub trait MigrationExtension {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Transform the compiled migration
    fn after_migration_compiled(
        &self,
        text: String,
        model: &ModelData,
        config: &ScaffolderConfig,
    ) -> ScaffoldResult<String>;
}

/// Fold the extensions over `text`, left to right.
///
/// Errors other than [`ScaffoldError::Extension`] are wrapped so the failing
/// extension is named.
pub fn apply_extensions(
    text: String,
    model: &ModelData,
    config: &ScaffolderConfig,
    extensions: &[Box<dyn MigrationExtension>],
) -> ScaffoldResult<String> {
    extensions.iter().try_fold(text, |text, extension| {
        tracing::debug!(extension = extension.name(), "running migration extension");

        extension
            .after_migration_compiled(text, model, config)
            .map_err(|e| match e {
                ScaffoldError::Extension { .. } => e,
                other => ScaffoldError::extension(extension.name(), other.to_string()),
            })
    })
}

// ============================================================================
// SoftDeletes
// ============================================================================

/// Adds a `deleted_at` column after the timestamps statement
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftDeletes;

const TIMESTAMPS_STATEMENT: &str = "$table->timestamps();";

impl MigrationExtension for SoftDeletes {
    fn name(&self) -> &str {
        "soft-deletes"
    }

    fn after_migration_compiled(
        &self,
        text: String,
        _model: &ModelData,
        _config: &ScaffolderConfig,
    ) -> ScaffoldResult<String> {
        let Some(start) = text.find(TIMESTAMPS_STATEMENT) else {
            return Err(ScaffoldError::extension(
                self.name(),
                "migration has no timestamps statement",
            ));
        };

        let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
        let indent = text[line_start..start].to_string();
        let insert_at = start + TIMESTAMPS_STATEMENT.len();

        let mut out = String::with_capacity(text.len() + indent.len() + 32);
        out.push_str(&text[..insert_at]);
        out.push('\n');
        out.push_str(&indent);
        out.push_str("$table->softDeletes();");
        out.push_str(&text[insert_at..]);
        Ok(out)
    }
}

// ============================================================================
// Tests
// ============================================================================
