//! Loading model definitions and scaffolder configuration
//!
//! Model and configuration files are JSON. Both loaders validate what they
//! read, so the compiler only ever sees well-formed input.

use crate::{ModelData, ScaffolderConfig};
use scaffolder_core::{Persistable, ScaffoldError, ScaffoldResult, Validatable};
use std::path::Path;

/// Load a model definition from a file
///
/// # Example
///
/// ```rust,ignore
/// use scaffolder_ir::load_model;
///
/// let model = load_model("scaffolder-config/models/Post.json").unwrap();
/// println!("{} fields", model.field_count());
/// ```
pub fn load_model(path: impl AsRef<Path>) -> ScaffoldResult<ModelData> {
    let path = path.as_ref();
    let json = read_file(path)?;

    load_model_from_string(&json).map_err(|e| match e {
        ScaffoldError::JsonSerialization(je) => ScaffoldError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid model file format: {}", je),
        },
        other => other,
    })
}

/// Load a model definition from a JSON string
pub fn load_model_from_string(json: &str) -> ScaffoldResult<ModelData> {
    let model = ModelData::from_json(json)?;
    model.validate()?;
    Ok(model)
}

/// Load scaffolder configuration from a file
pub fn load_config(path: impl AsRef<Path>) -> ScaffoldResult<ScaffolderConfig> {
    let path = path.as_ref();
    let json = read_file(path)?;

    ScaffolderConfig::parse(&json).map_err(|e| match e {
        ScaffoldError::JsonSerialization(je) => ScaffoldError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid configuration file format: {}", je),
        },
        other => other,
    })
}

fn read_file(path: &Path) -> ScaffoldResult<String> {
    if !path.exists() {
        return Err(ScaffoldError::FileRead {
            path: path.to_path_buf(),
            message: "file does not exist".to_string(),
        });
    }

    std::fs::read_to_string(path).map_err(|e| ScaffoldError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
