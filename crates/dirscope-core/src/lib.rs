//! Core types for dirscope.
//!
//! This crate provides the data structures shared by the scanner and the
//! report renderers: ignore patterns and the decision logic built on them,
//! tree nodes, streaming statistics, configuration, and errors.

mod config;
mod error;
mod ignore;
mod node;
mod pattern;
mod stats;
mod tree;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ConfigError, ScanError, ScanWarning, WarningKind, describe_io};
pub use ignore::{EntryContext, is_ignored};
pub use node::{EntryType, Node, NodeKind, ROOT_PATH};
pub use pattern::{Pattern, PatternSet, matches};
pub use stats::{
    DEFAULT_TOP_N, EntryFact, ExtensionStats, FactSink, LargestFile, Statistics,
    StatsAccumulator, extension_of,
};
pub use tree::ScanReport;
