//! Streaming statistics over scanned entries.
//!
//! The walker emits one [`EntryFact`] per surviving entry; a
//! [`StatsAccumulator`] folds them into [`Statistics`] without keeping the
//! facts around.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::EntryType;

/// Default number of largest files to keep.
pub const DEFAULT_TOP_N: usize = 5;

/// Per-entry record emitted during traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFact {
    /// Path from the scan root, `/`-separated.
    pub relative_path: String,
    /// File or directory.
    pub entry_type: EntryType,
    /// Size in bytes, 0 for directories.
    pub size_bytes: u64,
    /// Number of directories between the scan root and the entry.
    pub depth: usize,
    /// Lower-cased extension without the dot, empty if none.
    pub extension: String,
}

impl EntryFact {
    /// Fact for a file; the extension is derived from the base name.
    pub fn file(relative_path: impl Into<String>, size_bytes: u64, depth: usize) -> Self {
        let relative_path = relative_path.into();
        let base_name = relative_path.rsplit('/').next().unwrap_or_default();
        let extension = extension_of(base_name);
        Self {
            relative_path,
            entry_type: EntryType::File,
            size_bytes,
            depth,
            extension,
        }
    }

    /// Fact for a directory.
    pub fn directory(relative_path: impl Into<String>, depth: usize) -> Self {
        Self {
            relative_path: relative_path.into(),
            entry_type: EntryType::Directory,
            size_bytes: 0,
            depth,
            extension: String::new(),
        }
    }
}

/// Lower-cased suffix after the last `.` of a file name.
///
/// Dotfiles such as `.bashrc` have no extension, and neither do names
/// ending in a dot.
pub fn extension_of(name: &str) -> String {
    let stem = name.strip_prefix('.').unwrap_or(name);
    stem.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Receiver for entry facts as they are produced.
pub trait FactSink {
    /// Handle one fact.
    fn observe(&mut self, fact: &EntryFact);
}

impl<F> FactSink for F
where
    F: FnMut(&EntryFact),
{
    fn observe(&mut self, fact: &EntryFact) {
        self(fact)
    }
}

/// File count and byte total for one extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    /// Number of files.
    pub file_count: u64,
    /// Sum of file sizes.
    pub byte_total: u64,
}

/// Entry in the largest-files list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestFile {
    /// Relative path of the file.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
}

/// Summary statistics for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories, excluding the root.
    pub total_directories: u64,
    /// Sum of all file sizes.
    pub total_size_bytes: u64,
    /// Deepest entry depth seen.
    pub max_depth: usize,
    /// Per-extension totals in first-seen order. Files without an
    /// extension are keyed by the empty string.
    pub by_extension: IndexMap<String, ExtensionStats>,
    /// Largest files, descending by size.
    pub largest_files: Vec<LargestFile>,
}

impl Statistics {
    /// Extensions ordered by file count descending, then first-seen order.
    pub fn extensions_by_count(&self) -> Vec<(&str, ExtensionStats)> {
        let mut entries: Vec<_> = self
            .by_extension
            .iter()
            .map(|(ext, stats)| (ext.as_str(), *stats))
            .collect();
        entries.sort_by(|a, b| b.1.file_count.cmp(&a.1.file_count));
        entries
    }

    /// Total number of entries (files and directories).
    pub fn total_entries(&self) -> u64 {
        self.total_files + self.total_directories
    }
}

/// Folds entry facts into [`Statistics`].
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    stats: Statistics,
    limit: usize,
}

impl StatsAccumulator {
    /// Create an accumulator keeping the `limit` largest files.
    pub fn new(limit: usize) -> Self {
        Self {
            stats: Statistics::default(),
            limit,
        }
    }

    /// Update running totals with one fact.
    pub fn observe(&mut self, fact: &EntryFact) {
        match fact.entry_type {
            EntryType::File => {
                self.stats.total_files += 1;
                self.stats.total_size_bytes += fact.size_bytes;

                let entry = self
                    .stats
                    .by_extension
                    .entry(fact.extension.clone())
                    .or_default();
                entry.file_count += 1;
                entry.byte_total += fact.size_bytes;

                self.record_largest(&fact.relative_path, fact.size_bytes);
            }
            EntryType::Directory => {
                self.stats.total_directories += 1;
            }
        }
        self.stats.max_depth = self.stats.max_depth.max(fact.depth);
    }

    /// Insert after every file of equal or greater size, so ties keep
    /// observation order.
    fn record_largest(&mut self, path: &str, size: u64) {
        let largest = &mut self.stats.largest_files;
        let pos = largest.partition_point(|f| f.size >= size);
        if pos >= self.limit {
            return;
        }
        largest.insert(
            pos,
            LargestFile {
                path: path.to_string(),
                size,
            },
        );
        largest.truncate(self.limit);
    }

    /// Copy of the statistics so far.
    pub fn snapshot(&self) -> Statistics {
        self.stats.clone()
    }

    /// Consume the accumulator, returning the final statistics.
    pub fn into_statistics(self) -> Statistics {
        self.stats
    }
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl FactSink for StatsAccumulator {
    fn observe(&mut self, fact: &EntryFact) {
        StatsAccumulator::observe(self, fact);
    }
}
