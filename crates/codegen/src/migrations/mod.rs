//! # Migration Generation
//!
//! This module compiles schema-builder migration files from a model's field
//! list and a stub template.
//!
//! ## Generated Files
//!
//! Each compiled model produces one migration named:
//! ```text
//! {migrations_dir}/{YYYY_MM_DD_HHMMSS}_create_{model}s_table.php
//! ```
//!
//! ## Features
//!
//! - Default auto-incrementing `id` unless a field is declared `primary`
//! - Modifier chains (`->nullable()->default(0)`)
//! - Index calls (`->unique()`, `->index()`, `->primary()`)
//! - Foreign key constraints right after their column
//! - `timestamps()` column pair
//! - Content-addressed cache keyed by a caller-supplied hash

pub mod compiler;
pub mod fields;

pub use compiler::{CompiledArtifact, MigrationCompiler, render_migration};
pub use fields::{ColumnStatement, synthesize_fields};
