//! Model definitions
//!
//! A `ModelData` is the field list of one model, as read from its model
//! definition file. It is owned by the caller and read-only to the compiler.

use scaffolder_core::{Persistable, ScaffoldError, ScaffoldResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::field::{ColumnDefinition, FieldDescriptor};

/// The field list of a model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelData {
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ModelData {
    /// Create a model from a field list
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Get the field declared as primary key, if any
    pub fn primary_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.is_primary())
    }

    /// Whether any field declares `index == "primary"`
    pub fn has_primary_key(&self) -> bool {
        self.primary_field().is_some()
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Validate and parse every field, preserving declaration order
    pub fn columns(&self) -> ScaffoldResult<Vec<ColumnDefinition>> {
        self.validate()?;
        self.fields.iter().map(FieldDescriptor::to_column).collect()
    }
}

impl Validatable for ModelData {
    fn validate(&self) -> ScaffoldResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            field.validate()?;

            if !seen.insert(field.name.as_str()) {
                return Err(ScaffoldError::field_validation(
                    &field.name,
                    "Duplicate field name",
                ));
            }
        }

        let primaries: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.is_primary())
            .map(|f| f.name.as_str())
            .collect();

        if primaries.len() > 1 {
            return Err(ScaffoldError::field_validation(
                primaries[1],
                format!(
                    "Only one primary key is allowed, found: {}",
                    primaries.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl Persistable for ModelData {}

// ============================================================================
// Tests
// ============================================================================
