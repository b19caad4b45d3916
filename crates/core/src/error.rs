//! Error types for the scaffolder
//!
//! This module provides unified error handling across the scaffolder,
//! including field validation, directive parsing, extension failures,
//! cache and IO errors, and configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the scaffolder
#[derive(Debug, Error)]
pub enum ScaffoldError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field validation failed
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    // ========================================================================
    // Directive Errors
    // ========================================================================
    /// A modifier directive could not be parsed
    #[error("Invalid modifier '{directive}' on field '{field}': {message}")]
    InvalidModifier {
        field: String,
        directive: String,
        message: String,
    },

    /// A foreign key directive could not be parsed
    #[error(
        "Invalid foreign key '{value}' on field '{field}': expected '<referenced_column>:<referenced_table>'"
    )]
    InvalidForeignKey { field: String, value: String },

    /// An index directive is not a valid identifier
    #[error("Invalid index '{value}' on field '{field}'")]
    InvalidIndex { field: String, value: String },

    // ========================================================================
    // Extension Errors
    // ========================================================================
    /// An extension failed while post-processing a migration
    #[error("Extension '{extension}' failed: {message}")]
    Extension { extension: String, message: String },

    // ========================================================================
    // Cache Errors
    // ========================================================================
    /// Cache entry could not be read
    #[error("Failed to read cache entry '{key}': {message}")]
    CacheRead { key: String, message: String },

    /// Cache entry could not be written
    #[error("Failed to write cache entry '{key}': {message}")]
    CacheWrite { key: String, message: String },

    /// Cache entry does not exist
    #[error("Cache entry not found: {0}")]
    CacheMiss(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl ScaffoldError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ScaffoldError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ScaffoldError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid modifier error
    pub fn invalid_modifier(
        field: impl Into<String>,
        directive: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        ScaffoldError::InvalidModifier {
            field: field.into(),
            directive: directive.into(),
            message: msg.into(),
        }
    }

    /// Create an extension failure
    pub fn extension(extension: impl Into<String>, msg: impl Into<String>) -> Self {
        ScaffoldError::Extension {
            extension: extension.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is caused by invalid input (fields, directives, config)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScaffoldError::Validation(_)
                | ScaffoldError::FieldValidation { .. }
                | ScaffoldError::InvalidModifier { .. }
                | ScaffoldError::InvalidForeignKey { .. }
                | ScaffoldError::InvalidIndex { .. }
                | ScaffoldError::InvalidConfig(_)
                | ScaffoldError::MissingConfig(_)
        )
    }

    /// Check if this error is a cache error
    pub fn is_cache(&self) -> bool {
        matches!(
            self,
            ScaffoldError::CacheRead { .. }
                | ScaffoldError::CacheWrite { .. }
                | ScaffoldError::CacheMiss(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ScaffoldError::FileRead { .. }
                | ScaffoldError::FileWrite { .. }
                | ScaffoldError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using ScaffoldError
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error() {
        let err = ScaffoldError::validation("Model has no fields");
        assert!(err.is_validation());
        assert!(!err.is_io());
        assert_eq!(err.to_string(), "Validation error: Model has no fields");
    }

    #[test]
    fn test_field_validation_error() {
        let err = ScaffoldError::field_validation("email", "Invalid column type 'var char'");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'email': Invalid column type 'var char'"
        );
    }

    #[test]
    fn test_invalid_modifier_error() {
        let err = ScaffoldError::invalid_modifier("price", "default,1,2", "too many arguments");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid modifier 'default,1,2' on field 'price': too many arguments"
        );
    }

    #[test]
    fn test_invalid_foreign_key_error() {
        let err = ScaffoldError::InvalidForeignKey {
            field: "user_id".to_string(),
            value: "users".to_string(),
        };
        assert!(err.is_validation());
        assert!(err.to_string().contains("'users'"));
        assert!(err.to_string().contains("<referenced_column>:<referenced_table>"));
    }

    #[test]
    fn test_extension_error() {
        let err = ScaffoldError::extension("soft-deletes", "stub has no fields block");
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "Extension 'soft-deletes' failed: stub has no fields block"
        );
    }

    #[test]
    fn test_cache_error_classification() {
        let err = ScaffoldError::CacheWrite {
            key: "migration_abc.scf".to_string(),
            message: "disk full".to_string(),
        };
        assert!(err.is_cache());
        assert!(!err.is_io());
    }

    #[test]
    fn test_file_error_classification() {
        let err = ScaffoldError::FileWrite {
            path: PathBuf::from("database/migrations/x.php"),
            message: "Permission denied".to_string(),
        };
        assert!(err.is_io());
        assert!(!err.is_cache());
    }
}
