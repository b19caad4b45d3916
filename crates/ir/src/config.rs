//! Scaffolder configuration
//!
//! Per-model configuration read from the scaffolder config file. Only the
//! keys the migration compiler needs are modelled; everything else in the
//! file is ignored.

use scaffolder_core::{Persistable, ScaffoldError, ScaffoldResult, Validatable};
use serde::{Deserialize, Serialize};

use crate::directive::is_valid_identifier;

// ============================================================================
// ScaffolderConfig
// ============================================================================

/// Configuration for compiling one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffolderConfig {
    /// Explicit table name, overriding the pluralized model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    /// Output path templates
    pub paths: PathsConfig,
}

/// Output path templates (may contain `{{base_path}}`-style tokens)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory template for migration files
    pub migrations: String,
}

impl ScaffolderConfig {
    /// Create a configuration writing migrations to the given path template
    pub fn new(migrations: impl Into<String>) -> Self {
        Self {
            table_name: None,
            paths: PathsConfig {
                migrations: migrations.into(),
            },
        }
    }

    /// Set an explicit table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Get the table name override, treating an empty string as unset
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Get the migrations path template
    pub fn migrations_path(&self) -> &str {
        &self.paths.migrations
    }

    /// Load and validate a configuration from a JSON string
    pub fn parse(json: &str) -> ScaffoldResult<Self> {
        let config = Self::from_json(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validatable for ScaffolderConfig {
    fn validate(&self) -> ScaffoldResult<()> {
        if self.paths.migrations.trim().is_empty() {
            return Err(ScaffoldError::MissingConfig("paths.migrations".to_string()));
        }

        if let Some(table) = self.table_name() {
            if !is_valid_identifier(table) {
                return Err(ScaffoldError::InvalidConfig(format!(
                    "tableName '{}' is not a valid identifier",
                    table
                )));
            }
        }

        Ok(())
    }
}

impl Persistable for ScaffolderConfig {}

// ============================================================================
// Tests
// ============================================================================
