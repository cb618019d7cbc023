//! Ignore patterns and pattern sets.
//!
//! Patterns use a small subset of gitignore syntax:
//!
//! - `*` matches any run of characters inside one path segment
//! - `?` matches exactly one character
//! - a trailing `/` restricts the pattern to directories
//! - a leading `/` restricts the pattern to direct children of the scan root
//!
//! Everything else matches literally and case-sensitively. Negation,
//! escaping and `**` are not supported.

use std::path::Path;

use glob::{MatchOptions, Pattern as GlobPattern};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single parsed ignore rule.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The trimmed source line this pattern was parsed from.
    source: String,
    /// Match text with leading and trailing separators removed.
    text: String,
    is_directory_only: bool,
    is_rooted: bool,
    has_wildcard: bool,
    /// Compiled glob, present only when the text has wildcards.
    matcher: Option<GlobPattern>,
}

impl Pattern {
    /// Parse one ignore-file line.
    ///
    /// Returns `None` for blank lines, comments, and lines that are nothing
    /// but separators.
    pub fn parse(line: &str) -> Option<Self> {
        let source = line.trim();
        if source.is_empty() || source.starts_with('#') {
            return None;
        }

        let (body, is_directory_only) = match source.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (source, false),
        };
        let (body, is_rooted) = match body.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (body, false),
        };
        if body.is_empty() {
            return None;
        }

        let has_wildcard = body.contains(['*', '?']);
        let matcher = if has_wildcard {
            compile_glob(body)
        } else {
            None
        };

        Some(Self {
            source: source.to_string(),
            text: body.to_string(),
            is_directory_only,
            is_rooted,
            has_wildcard,
            matcher,
        })
    }

    /// The match text, without separators.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The trimmed line this pattern came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the pattern only applies to directories.
    pub fn is_directory_only(&self) -> bool {
        self.is_directory_only
    }

    /// Whether the pattern only applies at the top level of the scan.
    pub fn is_rooted(&self) -> bool {
        self.is_rooted
    }

    /// Whether the pattern contains `*` or `?`.
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    /// Whether the pattern targets a relative path rather than a base name.
    pub fn is_path_pattern(&self) -> bool {
        self.text.contains('/')
    }

    /// Match `candidate` against the pattern text, ignoring the
    /// directory-only flag.
    pub fn matches_text(&self, candidate: &str) -> bool {
        if self.text == candidate {
            return true;
        }
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.matches_with(candidate, MATCH_OPTIONS))
    }

    /// Match a base name, honoring the directory-only flag.
    pub fn matches(&self, base_name: &str, is_directory: bool) -> bool {
        matches(self, base_name, is_directory)
    }
}

/// Decide whether `pattern` matches the entry `base_name`.
///
/// Directory-only patterns never match files. Patterns without wildcards
/// match by exact equality.
pub fn matches(pattern: &Pattern, base_name: &str, is_directory: bool) -> bool {
    if pattern.is_directory_only && !is_directory {
        return false;
    }
    pattern.matches_text(base_name)
}

/// `*` and `?` never cross `/`; matching is case-sensitive and dotfiles
/// get no special treatment.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Build a glob where only `*` and `?` are special. `?` matches one
/// character, not one byte.
fn compile_glob(text: &str) -> Option<GlobPattern> {
    let mut escaped = String::with_capacity(text.len() + 4);
    let mut prev_star = false;
    for c in text.chars() {
        match c {
            // Collapse `**` so it never gets recursive semantics.
            '*' if prev_star => continue,
            '*' | '?' => escaped.push(c),
            _ => escaped.push_str(&GlobPattern::escape(c.encode_utf8(&mut [0; 4]))),
        }
        prev_star = c == '*';
    }

    match GlobPattern::new(&escaped) {
        Ok(compiled) => Some(compiled),
        Err(err) => {
            tracing::warn!(pattern = text, %err, "invalid ignore pattern, matching literally");
            None
        }
    }
}

/// An ordered collection of ignore patterns.
///
/// Order follows the source file, but matching is a disjunction so it
/// never affects the outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Create an empty pattern set, which ignores nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse patterns from ignore-file lines, skipping blanks and comments.
    pub fn load<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: lines
                .into_iter()
                .filter_map(|line| Pattern::parse(line.as_ref()))
                .collect(),
        }
    }

    /// Parse the full text of an ignore file.
    pub fn parse(content: &str) -> Self {
        Self::load(content.lines())
    }

    /// Read and parse an ignore file from disk.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(Self::parse(&content))
    }

    /// Iterate over the patterns in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the set has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check whether any pattern matches a base name.
    ///
    /// This ignores rooted and path patterns' position constraints; use
    /// [`PatternSet::is_ignored`] for a full decision.
    pub fn matches_name(&self, base_name: &str, is_directory: bool) -> bool {
        self.patterns
            .iter()
            .any(|pattern| matches(pattern, base_name, is_directory))
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl From<PatternSet> for Vec<String> {
    fn from(set: PatternSet) -> Self {
        set.patterns.into_iter().map(|p| p.source).collect()
    }
}

impl From<Vec<String>> for PatternSet {
    fn from(lines: Vec<String>) -> Self {
        Self::load(lines)
    }
}
