//! Directory scanning for dirscope.
//!
//! `dirscope-scan` walks a directory tree once and produces both a
//! [`Node`] tree and a stream of [`EntryFact`]s. Key properties:
//!
//! - **Pruning**: ignored directories are never listed
//! - **Listing order**: children appear in the order the filesystem reports
//! - **Partial-failure tolerance**: unreadable subdirectories become empty
//!   nodes with a warning; only an invalid root is fatal
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscope_scan::{PatternSet, ScanConfig, TreeWalker};
//!
//! let config = ScanConfig::builder()
//!     .root("/path/to/scan")
//!     .patterns(PatternSet::load(["target/", "*.log"]))
//!     .build()
//!     .unwrap();
//!
//! let report = TreeWalker::new(config).scan().unwrap();
//! println!("Total files: {}", report.total_files());
//! println!("Total size: {} bytes", report.total_size());
//! ```
//!
//! # Streaming facts
//!
//! Any `FnMut(&EntryFact)` can receive facts directly:
//!
//! ```rust,no_run
//! use dirscope_scan::{EntryFact, ScanConfig, TreeWalker};
//!
//! let walker = TreeWalker::new(ScanConfig::new("."));
//! let output = walker
//!     .walk(&mut |fact: &EntryFact| println!("{} {}", fact.depth, fact.relative_path))
//!     .unwrap();
//! println!("{} top-level entries", output.root.child_count());
//! ```

pub mod ignore_file;
mod walker;

pub use ignore_file::{DEFAULT_IGNORE_FILE, IgnoreLookup};
pub use walker::{ScanOutput, TreeWalker};

// Re-export core types for convenience
pub use dirscope_core::{
    EntryFact, FactSink, Node, PatternSet, ScanConfig, ScanError, ScanReport, ScanWarning,
    Statistics, StatsAccumulator, WarningKind,
};
