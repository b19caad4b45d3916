//! Content hash for the migration cache.
//!
//! Callers may supply their own hash. This one is a SHA-256 over everything
//! that decides what a compile produces: the field list, the model name, the
//! resolved table name, the stub text and the ordered extension names. Each
//! part is length-framed, so moving bytes between parts changes the hash.

use scaffolder_core::ScaffoldResult;
use scaffolder_ir::{ModelData, ScaffolderConfig};
use sha2::{Digest, Sha256};

use crate::extension::MigrationExtension;
use crate::naming::resolve_table_name;
use crate::template::Stub;

/// Lowercase hex SHA-256 identifying what a model compiles to
pub fn fingerprint(
    model_name: &str,
    model: &ModelData,
    config: &ScaffolderConfig,
    stub: &Stub,
    extensions: &[Box<dyn MigrationExtension>],
) -> ScaffoldResult<String> {
    let fields = serde_json::to_vec(&model.fields)?;

    let mut hasher = Sha256::new();
    write_framed(&mut hasher, b"fields", &fields);
    write_framed(&mut hasher, b"model", model_name.as_bytes());
    write_framed(
        &mut hasher,
        b"table",
        resolve_table_name(config, model_name).as_bytes(),
    );
    write_framed(&mut hasher, b"stub", stub.text.as_bytes());
    for extension in extensions {
        write_framed(&mut hasher, b"extension", extension.name().as_bytes());
    }

    Ok(hex::encode(hasher.finalize()))
}

fn write_framed(hasher: &mut Sha256, label: &[u8], bytes: &[u8]) {
    let label_len = u32::try_from(label.len()).unwrap_or(u32::MAX);
    hasher.update(label_len.to_be_bytes());
    hasher.update(label);

    let bytes_len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
    hasher.update(bytes_len.to_be_bytes());
    hasher.update(bytes);
}
