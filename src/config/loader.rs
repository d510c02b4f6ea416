// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{JobGraphFile, RawJobGraphFile};
use crate::errors::Result;

/// Load a job graph file from a given path and return the raw
/// `RawJobGraphFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawJobGraphFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    load_from_str(&contents)
}

/// Deserialize a job graph from TOML text.
pub fn load_from_str(contents: &str) -> Result<RawJobGraphFile> {
    let config: RawJobGraphFile = toml::from_str(contents)?;
    Ok(config)
}

/// Load a job graph file from path and run basic validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for an empty graph and empty names.
///
/// Unknown outcome references are *not* an error here: the graph compiler
/// prunes jobs whose requirements nobody provides.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<JobGraphFile> {
    let raw_config = load_from_path(&path)?;
    let config = JobGraphFile::try_from(raw_config)?;
    Ok(config)
}

/// Default job graph path: `Jobdag.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Jobdag.toml")
}
