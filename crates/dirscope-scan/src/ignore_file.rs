//! Locating and loading `.dirignore` files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dirscope_core::{ConfigError, PatternSet};

/// Default ignore file name.
pub const DEFAULT_IGNORE_FILE: &str = ".dirignore";

/// Outcome of looking for an ignore file.
#[derive(Debug)]
pub enum IgnoreLookup {
    /// The file was found and parsed.
    Loaded {
        path: PathBuf,
        patterns: PatternSet,
    },
    /// No file exists at the expected location.
    Missing { path: PathBuf },
    /// The file exists but could not be read.
    Failed { error: ConfigError },
}

impl IgnoreLookup {
    /// Patterns to scan with. Missing and unreadable files give an empty set.
    pub fn into_patterns(self) -> PatternSet {
        match self {
            IgnoreLookup::Loaded { patterns, .. } => patterns,
            IgnoreLookup::Missing { .. } | IgnoreLookup::Failed { .. } => PatternSet::new(),
        }
    }

    /// Path that was consulted.
    pub fn path(&self) -> &Path {
        match self {
            IgnoreLookup::Loaded { path, .. } | IgnoreLookup::Missing { path } => path,
            IgnoreLookup::Failed { error } => error.path(),
        }
    }
}

/// Look for `file_name` directly inside `dir`.
///
/// The scan target is not consulted; callers pass the working directory.
pub fn discover(dir: &Path, file_name: &str) -> IgnoreLookup {
    load(&dir.join(file_name))
}

/// Load an ignore file from an explicit path.
///
/// Only a file that does not exist is `Missing`; any other read failure,
/// including a failed stat, is `Failed`.
pub fn load(path: &Path) -> IgnoreLookup {
    match PatternSet::read_from(path) {
        Ok(patterns) => {
            tracing::debug!(path = %path.display(), count = patterns.len(), "loaded ignore patterns");
            IgnoreLookup::Loaded {
                path: path.to_path_buf(),
                patterns,
            }
        }
        Err(ConfigError::Unreadable { source, .. }) if source.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no ignore file");
            IgnoreLookup::Missing {
                path: path.to_path_buf(),
            }
        }
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable ignore file");
            IgnoreLookup::Failed { error }
        }
    }
}
