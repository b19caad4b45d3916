//! Core traits for the scaffolder
//!
//! This module defines the traits that model definitions and generated
//! statements implement to provide consistent behavior for validation,
//! code generation, and persistence.

use crate::error::{ScaffoldError, ScaffoldResult};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use scaffolder_core::{ScaffoldError, ScaffoldResult, Validatable};
///
/// struct Paths {
///     migrations: String,
/// }
///
/// impl Validatable for Paths {
///     fn validate(&self) -> ScaffoldResult<()> {
///         if self.migrations.is_empty() {
///             return Err(ScaffoldError::validation("Migrations path cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `ScaffoldError` describing the problem.
    fn validate(&self) -> ScaffoldResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// CodeGenerable Trait
// ============================================================================

/// Context passed to code generation methods
#[derive(Debug, Clone)]
pub struct CodeGenContext {
    /// Indentation level
    pub indent_level: usize,
    /// Number of spaces per indent level
    pub spaces_per_indent: usize,
}

impl Default for CodeGenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenContext {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            spaces_per_indent: 4,
        }
    }

    /// Create a context at a fixed indentation level
    pub fn at_level(indent_level: usize) -> Self {
        Self {
            indent_level,
            ..Self::new()
        }
    }

    /// Get the current indentation string
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.spaces_per_indent)
    }
}

/// Trait for types that can generate code
///
/// # Example
///
/// ```rust,ignore
/// use scaffolder_core::{CodeGenContext, CodeGenerable, ScaffoldResult};
///
/// struct Timestamps;
///
/// impl CodeGenerable for Timestamps {
///     fn generate(&self, ctx: &CodeGenContext) -> ScaffoldResult<String> {
///         Ok(format!("{}$table->timestamps();\n", ctx.indent()))
///     }
/// }
/// ```
pub trait CodeGenerable {
    /// Generate code for this type
    fn generate(&self, ctx: &CodeGenContext) -> ScaffoldResult<String>;
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types that can be loaded from and saved to JSON files
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Save to a JSON string
    fn to_json(&self) -> ScaffoldResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> ScaffoldResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file
    fn save_to_file(&self, path: &Path) -> ScaffoldResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ScaffoldError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
