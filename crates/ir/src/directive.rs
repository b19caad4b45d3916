//! Field directive parsing
//!
//! Model files describe modifiers and foreign keys with a small textual
//! syntax:
//!
//! - modifiers: `name[,argument]` directives joined by `:`
//!   (`"nullable:default,0"`)
//! - foreign keys: `"<referenced_column>:<referenced_table>"` (`"id:users"`)
//!
//! This module turns those strings into typed [`Modifier`] and
//! [`ForeignKeyRef`] values and rejects malformed input with a descriptive
//! error instead of guessing.

use regex::Regex;
use scaffolder_core::{ScaffoldError, ScaffoldResult};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Check whether a string is a valid schema-builder identifier
pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

// ============================================================================
// Modifier
// ============================================================================

/// A single chained column modifier, e.g. `->nullable()` or `->default(0)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    /// Schema-builder method name
    pub name: String,

    /// Raw argument text, emitted verbatim between the parentheses
    pub argument: Option<String>,
}

impl Modifier {
    /// Create a zero-argument modifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    /// Create a one-argument modifier
    pub fn with_argument(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: Some(argument.into()),
        }
    }

    /// Render the chained call (`->name()` / `->name(argument)`)
    pub fn to_call(&self) -> String {
        format!("->{}({})", self.name, self.argument.as_deref().unwrap_or(""))
    }

    /// Parse one `name[,argument]` directive
    fn parse_directive(field: &str, directive: &str) -> ScaffoldResult<Self> {
        let tokens: Vec<&str> = directive.split(',').map(str::trim).collect();

        let (name, argument) = match tokens.as_slice() {
            [name] => (*name, None),
            [name, argument] => (*name, Some(*argument)),
            _ => {
                return Err(ScaffoldError::invalid_modifier(
                    field,
                    directive,
                    format!(
                        "expected 'name' or 'name,value' but found {} comma-separated tokens",
                        tokens.len()
                    ),
                ));
            }
        };

        if name.is_empty() {
            return Err(ScaffoldError::invalid_modifier(
                field,
                directive,
                "modifier name is empty",
            ));
        }

        if !is_valid_identifier(name) {
            return Err(ScaffoldError::invalid_modifier(
                field,
                directive,
                format!("'{}' is not a valid modifier name", name),
            ));
        }

        if argument.is_some_and(str::is_empty) {
            return Err(ScaffoldError::invalid_modifier(
                field,
                directive,
                "modifier argument is empty",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            argument: argument.map(str::to_string),
        })
    }
}

/// Parse a `:`-separated modifier string into an ordered modifier chain.
///
/// An empty (or whitespace-only) string yields an empty chain. `field` is
/// only used for error reporting.
pub fn parse_modifiers(field: &str, modifiers: &str) -> ScaffoldResult<Vec<Modifier>> {
    if modifiers.trim().is_empty() {
        return Ok(Vec::new());
    }

    modifiers
        .split(':')
        .map(|directive| Modifier::parse_directive(field, directive))
        .collect()
}

// ============================================================================
// ForeignKeyRef
// ============================================================================

/// Target of a foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Column on the referenced table
    pub referenced_column: String,

    /// Referenced table
    pub referenced_table: String,
}

impl ForeignKeyRef {
    /// Create a foreign key reference
    pub fn new(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            referenced_column: column.into(),
            referenced_table: table.into(),
        }
    }

    /// Parse `"<referenced_column>:<referenced_table>"`.
    ///
    /// Returns `Ok(None)` for an empty string.
    pub fn parse(field: &str, value: &str) -> ScaffoldResult<Option<Self>> {
        if value.trim().is_empty() {
            return Ok(None);
        }

        let invalid = || ScaffoldError::InvalidForeignKey {
            field: field.to_string(),
            value: value.to_string(),
        };

        let parts: Vec<&str> = value.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [column, table] if is_valid_identifier(column) && is_valid_identifier(table) => {
                Ok(Some(Self::new(*column, *table)))
            }
            _ => Err(invalid()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
