//! JSON and YAML file persistence
//!
//! Readers deserialize into any `DeserializeOwned` type (usually a
//! `serde_json::Map` or a fixture struct). Writers serialize any `Serialize`
//! value as UTF-8 text, overwrite the target and return the path written.

use crate::error::{CoreError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when a JSON output path is not specified
pub const DEFAULT_JSON_OUTPUT: &str = "output.json";

/// File name used when a YAML output path is not specified
pub const DEFAULT_YAML_OUTPUT: &str = "output.yaml";

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CoreError::io(path, e))
}

fn write_text(path: &Path, text: &str) -> Result<PathBuf> {
    fs::write(path, text).map_err(|e| CoreError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Wrote file");
    Ok(path.to_path_buf())
}

/// Read a JSON document from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON for `T`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let text = read_text(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a YAML document from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for `T`.
pub fn read_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let text = read_text(path.as_ref())?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Write `data` as compact JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<PathBuf> {
    let text = serde_json::to_string(data)?;
    write_text(path.as_ref(), &text)
}

/// Write `data` as YAML to `path`.
pub fn write_yaml<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<PathBuf> {
    let text = serde_yaml::to_string(data)?;
    write_text(path.as_ref(), &text)
}
