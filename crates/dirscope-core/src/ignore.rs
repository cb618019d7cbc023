//! Ignore decisions for individual directory entries.

use crate::pattern::{Pattern, PatternSet, matches};

/// Path context for one entry under consideration.
#[derive(Debug, Clone, Copy)]
pub struct EntryContext<'a> {
    /// Final path component.
    pub base_name: &'a str,
    /// Path from the scan root, `/`-separated, without a leading `./`.
    pub relative_path: &'a str,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

impl<'a> EntryContext<'a> {
    /// Build a context from a relative path, deriving the base name.
    pub fn new(relative_path: &'a str, is_directory: bool) -> Self {
        let base_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        Self {
            base_name,
            relative_path,
            is_directory,
        }
    }

    /// Whether the entry sits directly under the scan root.
    pub fn is_top_level(&self) -> bool {
        !self.relative_path.contains('/')
    }
}

/// Decide whether an entry is ignored by any pattern in the set.
pub fn is_ignored(patterns: &PatternSet, entry: &EntryContext<'_>) -> bool {
    patterns.iter().any(|pattern| applies(pattern, entry))
}

fn applies(pattern: &Pattern, entry: &EntryContext<'_>) -> bool {
    if pattern.is_path_pattern() {
        if pattern.is_directory_only() && !entry.is_directory {
            return false;
        }
        return pattern.matches_text(entry.relative_path);
    }
    if pattern.is_rooted() && !entry.is_top_level() {
        return false;
    }
    matches(pattern, entry.base_name, entry.is_directory)
}

impl PatternSet {
    /// Decide whether an entry is ignored. See [`is_ignored`].
    pub fn is_ignored(&self, entry: &EntryContext<'_>) -> bool {
        is_ignored(self, entry)
    }
}
