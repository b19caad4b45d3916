//! # Scaffolder Core
//!
//! Core types, traits, and error handling for the migration scaffolder.
//!
//! This crate provides the foundational building blocks used by the model
//! definitions and the migration compiler, including:
//!
//! - **Types**: Schema-builder vocabulary (`ColumnType`, `IndexKind`)
//! - **Traits**: Common behaviors like `Validatable`, `CodeGenerable` and `Persistable`
//! - **Errors**: Unified error handling with `ScaffoldError` and `ScaffoldResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ScaffoldError, ScaffoldResult};
pub use traits::{CodeGenContext, CodeGenerable, Persistable, Validatable};
pub use types::{ColumnType, IndexKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
