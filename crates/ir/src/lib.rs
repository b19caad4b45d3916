//! # Scaffolder IR
//!
//! Model definitions for the migration scaffolder. This crate holds the data
//! the migration compiler reads: a model's field list, the per-model
//! scaffolder configuration, and the parser for the textual field
//! directives.
//!
//! ## Core Concepts
//!
//! - **FieldDescriptor**: One field of a model as written in its definition file
//! - **ColumnDefinition**: A field with its modifiers, index and foreign key parsed
//! - **ModelData**: The ordered field list of a model
//! - **ScaffolderConfig**: Table name override and output path templates
//!

// Module declarations
pub mod config;
pub mod directive;
pub mod field;
pub mod model;
pub mod serialization;

// Re-export commonly used types at crate root
pub use config::{PathsConfig, ScaffolderConfig};
pub use directive::{ForeignKeyRef, Modifier, is_valid_identifier, parse_modifiers};
pub use field::{ColumnDefinition, FieldDescriptor, FieldType};
pub use model::ModelData;
pub use serialization::{load_config, load_model, load_model_from_string};

// Re-export core types that are commonly used with IR
pub use scaffolder_core::{ColumnType, IndexKind, ScaffoldError, ScaffoldResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        ColumnDefinition, ColumnType, FieldDescriptor, ForeignKeyRef, IndexKind, ModelData,
        Modifier, ScaffoldError, ScaffoldResult, ScaffolderConfig,
    };
}
