//! Field definitions for model properties
//!
//! This module contains the `FieldDescriptor` struct as it appears in model
//! definition files, and the parsed `ColumnDefinition` the migration compiler
//! works from.

use scaffolder_core::{ColumnType, IndexKind, ScaffoldError, ScaffoldResult, Validatable};
use serde::{Deserialize, Serialize};

use crate::directive::{ForeignKeyRef, Modifier, is_valid_identifier, parse_modifiers};

// ============================================================================
// FieldDescriptor
// ============================================================================

/// Represents a field of a model (maps to a database column)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Column name
    pub name: String,

    /// Type information
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// `:`-separated modifier directives (`"nullable:default,0"`)
    #[serde(default)]
    pub modifiers: String,

    /// Index directive
    #[serde(default)]
    pub index: IndexKind,

    /// Foreign key directive (`"<referenced_column>:<referenced_table>"`)
    #[serde(default)]
    pub foreign_key: String,
}

/// Type information of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    /// Schema-builder column type name (`string`, `integer`, ...)
    pub db: String,
}

impl FieldDescriptor {
    /// Create a new field with the given name and column type
    pub fn new(name: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType { db: db.into() },
            modifiers: String::new(),
            index: IndexKind::None,
            foreign_key: String::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the modifier directives
    pub fn with_modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    /// Set the index directive
    pub fn with_index(mut self, index: impl Into<IndexKind>) -> Self {
        self.index = index.into();
        self
    }

    /// Set the foreign key directive
    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = foreign_key.into();
        self
    }

    /// Mark the field as the primary key
    pub fn primary(self) -> Self {
        self.with_index(IndexKind::Primary)
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Check if this field is the primary key
    pub fn is_primary(&self) -> bool {
        self.index.is_primary()
    }

    /// Parse the textual directives into a typed column definition.
    ///
    /// Column types outside the built-in vocabulary are passed through as
    /// [`ColumnType::Other`]. Fails on a column type that is not an
    /// identifier, or malformed modifiers, index or foreign key.
    pub fn to_column(&self) -> ScaffoldResult<ColumnDefinition> {
        self.validate()?;

        Ok(ColumnDefinition {
            name: self.name.clone(),
            column_type: ColumnType::from(self.field_type.db.as_str()),
            modifiers: parse_modifiers(&self.name, &self.modifiers)?,
            index: self.index.clone(),
            foreign_key: ForeignKeyRef::parse(&self.name, &self.foreign_key)?,
        })
    }
}

impl Validatable for FieldDescriptor {
    fn validate(&self) -> ScaffoldResult<()> {
        if self.name.is_empty() {
            return Err(ScaffoldError::validation("Field name cannot be empty"));
        }

        if !is_valid_identifier(&self.name) {
            return Err(ScaffoldError::field_validation(
                &self.name,
                "Field name is not a valid identifier",
            ));
        }

        let db = &self.field_type.db;
        if !ColumnType::is_known(db) && !is_valid_identifier(db) {
            return Err(ScaffoldError::field_validation(
                &self.name,
                format!("Invalid column type '{}'", db),
            ));
        }

        if let IndexKind::Other(name) = &self.index {
            if !is_valid_identifier(name) {
                return Err(ScaffoldError::InvalidIndex {
                    field: self.name.clone(),
                    value: name.clone(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// ColumnDefinition
// ============================================================================

/// A field with its directives parsed and validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    pub column_type: ColumnType,

    /// Modifier chain, in declaration order
    pub modifiers: Vec<Modifier>,

    /// Index directive
    pub index: IndexKind,

    /// Foreign key target
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnDefinition {
    pub fn is_primary(&self) -> bool {
        self.index.is_primary()
    }
}

// ============================================================================
// Tests
// ============================================================================
