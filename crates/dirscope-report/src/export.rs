//! JSON export of scan results.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use dirscope_core::Node;

/// Default file name for the tree export.
pub const DEFAULT_EXPORT_FILE: &str = "directory_structure.json";

/// Errors producing an export. The in-memory results are unaffected.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The value could not be serialized.
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("Failed to write export to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pretty-printed JSON for any serializable value.
pub fn to_json<T>(value: &T) -> Result<String, ExportError>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `root` as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json(root: &Node, path: &Path) -> Result<(), ExportError> {
    let json = to_json(root)?;
    fs::write(path, json + "\n").map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote export");
    Ok(())
}
