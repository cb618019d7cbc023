//! Scan result container.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::ScanWarning;
use crate::node::Node;
use crate::stats::Statistics;

/// Complete scanned tree with its statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root node of the tree.
    pub root: Node,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: Statistics,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Create a new scan report.
    pub fn new(
        root: Node,
        root_path: PathBuf,
        config: ScanConfig,
        stats: Statistics,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Get the total size of all files.
    pub fn total_size(&self) -> u64 {
        self.stats.total_size_bytes
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_directories
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{EntryFact, StatsAccumulator};

    #[test]
    fn test_report_accessors() {
        let mut root = Node::root("project");
        root.push_child(Node::new_file("a.txt", "a.txt", 10));

        let mut acc = StatsAccumulator::default();
        acc.observe(&EntryFact::file("a.txt", 10, 0));

        let report = ScanReport::new(
            root,
            PathBuf::from("/project"),
            ScanConfig::new("/project"),
            acc.into_statistics(),
            Duration::from_millis(3),
            Vec::new(),
        );

        assert_eq!(report.total_files(), 1);
        assert_eq!(report.total_dirs(), 0);
        assert_eq!(report.total_size(), 10);
        assert!(!report.has_warnings());
    }
}
