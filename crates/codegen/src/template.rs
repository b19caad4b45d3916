//! # Stub Templates
//!
//! Stubs are plain text files with `{{name}}` placeholder tokens. Rendering
//! replaces every occurrence of each supplied token; tokens without a value
//! are left in place and never raise an error.

use regex::Regex;
use scaffolder_core::{ScaffoldError, ScaffoldResult};
use std::path::Path;
use std::sync::LazyLock;

/// Placeholder filled with the model name
pub const CLASS_NAME: &str = "class_name";

/// Placeholder filled with the resolved table name
pub const TABLE_NAME: &str = "table_name";

/// Placeholder filled with the synthesized column statements
pub const FIELDS: &str = "fields";

const MIGRATION_STUB: &str = include_str!("../stubs/migration.stub");

// ============================================================================
// Placeholders
// ============================================================================

/// Ordered placeholder values; substitution runs in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: Vec<(String, String)>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder value, replacing an earlier value for the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Builder form of [`insert`](Placeholders::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Format a placeholder name as its token (`fields` → `{{fields}}`)
pub fn token(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Replace every `{{name}}` token for each supplied placeholder
pub fn substitute(template: &str, placeholders: &Placeholders) -> String {
    placeholders
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&token(name), value)
        })
}

// ============================================================================
// Stub
// ============================================================================

/// A named stub template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    /// Name used in log output
    pub name: String,

    /// Template text
    pub text: String,
}

impl Stub {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// The built-in migration stub
    pub fn migration() -> Self {
        Self::new("migration", MIGRATION_STUB)
    }

    /// Load a stub from a file
    pub fn load(path: impl AsRef<Path>) -> ScaffoldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ScaffoldError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stub".to_string());
        Ok(Self::new(name, text))
    }

    /// Render the stub with the given placeholder values
    pub fn render(&self, placeholders: &Placeholders) -> String {
        let rendered = substitute(&self.text, placeholders);

        let unresolved = unresolved_placeholders(&rendered);
        if !unresolved.is_empty() {
            tracing::debug!(
                stub = %self.name,
                placeholders = ?unresolved,
                "stub has unresolved placeholders",
            );
        }

        rendered
    }
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

/// List the `{{name}}` tokens still present in a text, in order of appearance
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for captures in PLACEHOLDER.captures_iter(text) {
        let name = &captures[1];
        if !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}

// ============================================================================
// Tests
// ============================================================================
