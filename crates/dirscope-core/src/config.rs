//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::ignore::EntryContext;
use crate::pattern::PatternSet;
use crate::stats::DEFAULT_TOP_N;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Ignore patterns applied to every entry below the root.
    #[builder(default)]
    #[serde(default)]
    pub patterns: PatternSet,

    /// Maximum depth to list (None = unlimited). Direct children of the
    /// root are at depth 0, so `Some(1)` lists only the root.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Number of largest files to keep in the statistics.
    #[builder(default = "DEFAULT_TOP_N")]
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if self.top_n == Some(0) {
            return Err("top_n must be at least 1".to_string());
        }
        Ok(())
    }
}

impl From<ScanConfigBuilderError> for ScanError {
    fn from(err: ScanConfigBuilderError) -> Self {
        ScanError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path with no patterns.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: PatternSet::new(),
            max_depth: None,
            follow_symlinks: false,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Check if an entry should be skipped.
    pub fn should_ignore(&self, entry: &EntryContext<'_>) -> bool {
        self.patterns.is_ignored(entry)
    }

    /// Check if entries at `depth` may be listed.
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .max_depth(3usize)
            .top_n(10usize)
            .follow_symlinks(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.top_n, 10);
        assert!(config.follow_symlinks);
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn test_config_builder_rejects_bad_values() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
        assert!(ScanConfig::builder().root("/tmp").top_n(0usize).build().is_err());
    }

    #[test]
    fn test_builder_failure_becomes_invalid_config() {
        let err = ScanConfig::builder()
            .root("/tmp")
            .top_n(0usize)
            .build()
            .map_err(ScanError::from)
            .unwrap_err();

        match err {
            ScanError::InvalidConfig { message } => assert!(message.contains("top_n")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(!config.follow_symlinks);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_should_ignore() {
        let config = ScanConfig::builder()
            .root("/test")
            .patterns(PatternSet::load(["node_modules/", "*.log"]))
            .build()
            .unwrap();

        assert!(config.should_ignore(&EntryContext::new("node_modules", true)));
        assert!(config.should_ignore(&EntryContext::new("logs/test.log", false)));
        assert!(!config.should_ignore(&EntryContext::new("src", true)));
    }

    #[test]
    fn test_allows_depth() {
        let mut config = ScanConfig::new("/test");
        assert!(config.allows_depth(1000));

        config.max_depth = Some(2);
        assert!(config.allows_depth(0));
        assert!(config.allows_depth(1));
        assert!(!config.allows_depth(2));
    }

    #[test]
    fn test_config_serde_keeps_pattern_lines() {
        let config = ScanConfig::builder()
            .root("/test")
            .patterns(PatternSet::parse("build/\n*.tmp\n"))
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"build/\""));

        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.patterns.len(), 2);
        assert!(back.patterns.matches_name("build", true));
    }
}
