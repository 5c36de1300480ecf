//! YAML persistence shared by the task store and the config file.

use crate::error::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize `value` as YAML and replace `path` with it.
///
/// The document goes to a tempfile in the same directory and is renamed over
/// `path`, so a concurrent reader sees the old task list or the new one.
pub(crate) fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write `value` only when `path` does not exist yet. Returns true if written.
pub(crate) fn create_yaml<T: Serialize>(path: &Path, value: &T) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_yaml(path, value)?;
    Ok(true)
}
