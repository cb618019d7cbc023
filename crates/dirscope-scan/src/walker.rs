//! Depth-first directory walker.

use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use dirscope_core::{
    EntryContext, EntryFact, FactSink, Node, ROOT_PATH, ScanConfig, ScanError, ScanReport,
    ScanWarning, StatsAccumulator, describe_io,
};

/// Tree and warnings produced by [`TreeWalker::walk`].
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Root node; its children are the surviving entries.
    pub root: Node,
    /// Canonical path of the scanned root.
    pub root_path: PathBuf,
    /// Non-fatal problems met along the way.
    pub warnings: Vec<ScanWarning>,
}

/// Single-threaded walker that builds a [`Node`] tree and streams an
/// [`EntryFact`] for every entry that survives the ignore patterns.
///
/// Ignored directories are never listed. Entries are visited in the order
/// the filesystem reports them.
pub struct TreeWalker {
    config: ScanConfig,
}

struct WalkState<'s, S: ?Sized> {
    sink: &'s mut S,
    warnings: Vec<ScanWarning>,
}

impl TreeWalker {
    /// Create a walker for the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk the tree and collect statistics in one pass.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let mut stats = StatsAccumulator::new(self.config.top_n);
        let output = self.walk(&mut stats)?;
        let scan_duration = start.elapsed();

        let stats = stats.into_statistics();
        tracing::info!(
            root = %output.root_path.display(),
            files = stats.total_files,
            dirs = stats.total_directories,
            warnings = output.warnings.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan complete"
        );

        Ok(ScanReport::new(
            output.root,
            output.root_path,
            self.config.clone(),
            stats,
            scan_duration,
            output.warnings,
        ))
    }

    /// Walk the tree, handing each surviving entry's fact to `sink`.
    ///
    /// Files are reported when visited; a directory is reported after its
    /// contents. Only problems with the root itself are fatal.
    pub fn walk<S>(&self, sink: &mut S) -> Result<ScanOutput, ScanError>
    where
        S: FactSink + ?Sized,
    {
        let root_path = self.resolve_root()?;
        let mut root = Node::root(root_name(&root_path));
        let mut state = WalkState {
            sink,
            warnings: Vec::new(),
        };

        if self.config.allows_depth(0) {
            let entries = list_dir(&root_path, &mut state.warnings)
                .map_err(|e| ScanError::io(&root_path, e))?;
            for entry in entries {
                if let Some(child) = self.visit_entry(&entry, ROOT_PATH, 0, &mut state) {
                    root.push_child(child);
                }
            }
        }

        Ok(ScanOutput {
            root,
            root_path,
            warnings: state.warnings,
        })
    }

    /// Check the root exists and is a directory, then canonicalize it.
    fn resolve_root(&self) -> Result<PathBuf, ScanError> {
        let root = &self.config.root;
        let metadata = fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root.clone() });
        }
        root.canonicalize().map_err(|e| ScanError::io(root, e))
    }

    /// Visit one entry of a directory listing at `depth`.
    fn visit_entry<S>(
        &self,
        entry: &DirEntry,
        parent_path: &str,
        depth: usize,
        state: &mut WalkState<'_, S>,
    ) -> Option<Node>
    where
        S: FactSink + ?Sized,
    {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative_path = join_relative(parent_path, &name);

        let (is_directory, size) = match self.inspect(entry, &path, &mut state.warnings) {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable entry");
                state.warnings.push(ScanWarning::metadata_error(&path, &err));
                return None;
            }
        };

        let context = EntryContext {
            base_name: &name,
            relative_path: &relative_path,
            is_directory,
        };
        if self.config.should_ignore(&context) {
            tracing::debug!(path = %relative_path, "ignored");
            return None;
        }

        if is_directory {
            let mut node = Node::new_directory(name, relative_path);
            self.fill_directory(&mut node, &path, depth + 1, state);
            state
                .sink
                .observe(&EntryFact::directory(node.relative_path.as_str(), depth));
            Some(node)
        } else {
            state
                .sink
                .observe(&EntryFact::file(relative_path.as_str(), size, depth));
            Some(Node::new_file(name, relative_path, size))
        }
    }

    /// List `dir_path` into `node`; children sit at `depth`.
    ///
    /// A listing failure leaves the node empty with an error marker.
    fn fill_directory<S>(
        &self,
        node: &mut Node,
        dir_path: &Path,
        depth: usize,
        state: &mut WalkState<'_, S>,
    ) where
        S: FactSink + ?Sized,
    {
        if !self.config.allows_depth(depth) {
            return;
        }

        let entries = match list_dir(dir_path, &mut state.warnings) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %dir_path.display(), %err, "cannot list directory");
                node.set_error(describe_io(&err));
                state.warnings.push(ScanWarning::read_error(dir_path, &err));
                return;
            }
        };

        for entry in entries {
            if let Some(child) = self.visit_entry(&entry, &node.relative_path, depth, state) {
                node.push_child(child);
            }
        }
    }

    /// Determine whether an entry is a directory and, for files, its size.
    ///
    /// Only a failure to read the entry's type is an error. Metadata
    /// failures fall back to the type with size 0.
    fn inspect(
        &self,
        entry: &DirEntry,
        path: &Path,
        warnings: &mut Vec<ScanWarning>,
    ) -> io::Result<(bool, u64)> {
        let file_type = entry.file_type()?;

        let metadata: io::Result<Metadata> = if file_type.is_symlink() && self.config.follow_symlinks
        {
            fs::metadata(path).or_else(|_| {
                warnings.push(ScanWarning::broken_symlink(path));
                entry.metadata()
            })
        } else {
            entry.metadata()
        };

        match metadata {
            Ok(metadata) if metadata.is_dir() => Ok((true, 0)),
            Ok(metadata) => Ok((false, metadata.len())),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot read metadata");
                warnings.push(ScanWarning::metadata_error(path, &err));
                Ok((file_type.is_dir(), 0))
            }
        }
    }
}

/// Read a directory listing fully, releasing the handle before returning.
///
/// Individual entries that fail to read are recorded and skipped.
fn list_dir(dir: &Path, warnings: &mut Vec<ScanWarning>) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                tracing::warn!(path = %dir.display(), %err, "cannot read directory entry");
                warnings.push(ScanWarning::read_error(dir, &err));
            }
        }
    }
    Ok(entries)
}

/// Join a child name onto a `/`-separated relative path.
fn join_relative(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Display name for the root: its final component, or the whole path for
/// filesystem roots.
fn root_name(root_path: &Path) -> String {
    root_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirscope_core::{EntryType, PatternSet};
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    fn child_names(node: &Node) -> Vec<String> {
        let mut names: Vec<String> = node.children().iter().map(|c| c.name.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative(".", "a"), "a");
        assert_eq!(join_relative("a/b", "c"), "a/b/c");
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(ScanConfig::new(temp.path()));
        let report = walker.scan().unwrap();

        assert_eq!(report.stats.total_files, 4);
        assert_eq!(report.stats.total_directories, 3);
        assert_eq!(report.stats.total_size_bytes, 5 + 17 + 4 + 17);
        assert_eq!(report.stats.max_depth, 2);
        assert_eq!(report.root.relative_path, ".");
        assert_eq!(child_names(&report.root), vec!["dir1", "dir2", "file1.txt"]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_relative_paths_use_forward_slashes() {
        let temp = create_test_tree();
        let report = TreeWalker::new(ScanConfig::new(temp.path())).scan().unwrap();

        let file3 = report.root.find("dir1/subdir/file3.txt").unwrap();
        assert_eq!(file3.size(), Some(4));
        assert_eq!(file3.name, "file3.txt");
    }

    #[test]
    fn test_directory_fact_follows_contents() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(ScanConfig::new(temp.path()));

        let mut order = Vec::new();
        walker
            .walk(&mut |fact: &EntryFact| order.push(fact.relative_path.clone()))
            .unwrap();

        let pos = |p: &str| order.iter().position(|x| x == p).unwrap();
        assert!(pos("dir1/subdir/file3.txt") < pos("dir1/subdir"));
        assert!(pos("dir1/subdir") < pos("dir1"));
        assert!(pos("dir2/file4.txt") < pos("dir2"));
    }

    #[test]
    fn test_ignore_patterns_prune() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .patterns(PatternSet::load(["dir1/"]))
            .build()
            .unwrap();

        let mut facts = Vec::new();
        let output = TreeWalker::new(config)
            .walk(&mut |fact: &EntryFact| facts.push(fact.clone()))
            .unwrap();

        assert_eq!(child_names(&output.root), vec!["dir2", "file1.txt"]);
        assert!(facts.iter().all(|f| !f.relative_path.starts_with("dir1")));
    }

    #[test]
    fn test_max_depth_keeps_directories_as_leaves() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(1usize)
            .build()
            .unwrap();

        let report = TreeWalker::new(config).scan().unwrap();
        assert_eq!(report.stats.total_files, 1);
        assert_eq!(report.stats.total_directories, 2);
        assert_eq!(report.stats.max_depth, 0);

        let dir1 = report.root.find("dir1").unwrap();
        assert!(dir1.is_dir());
        assert_eq!(dir1.child_count(), 0);
        assert!(dir1.error().is_none());
    }

    #[test]
    fn test_max_depth_zero_lists_nothing() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(0usize)
            .build()
            .unwrap();

        let report = TreeWalker::new(config).scan().unwrap();
        assert_eq!(report.root.child_count(), 0);
        assert_eq!(report.stats.total_entries(), 0);
    }

    #[test]
    fn test_root_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = TreeWalker::new(ScanConfig::new(&missing)).scan().unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn test_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = TreeWalker::new(ScanConfig::new(&file)).scan().unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[test]
    fn test_root_included_even_if_pattern_matches_it() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("build");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.txt"), "k").unwrap();

        let config = ScanConfig::builder()
            .root(&root)
            .patterns(PatternSet::load(["build/"]))
            .build()
            .unwrap();

        let report = TreeWalker::new(config).scan().unwrap();
        assert_eq!(report.root.name, "build");
        assert_eq!(report.root.child_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed_by_default() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("dir1"), temp.path().join("link")).unwrap();

        let report = TreeWalker::new(ScanConfig::new(temp.path())).scan().unwrap();
        let link = report.root.find("link").unwrap();
        assert_eq!(link.entry_type(), EntryType::File);
        assert_eq!(report.stats.total_directories, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_followed_when_enabled() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("dir2"), temp.path().join("link")).unwrap();

        let config = ScanConfig::builder()
            .root(temp.path())
            .follow_symlinks(true)
            .build()
            .unwrap();
        let report = TreeWalker::new(config).scan().unwrap();

        let link = report.root.find("link").unwrap();
        assert!(link.is_dir());
        assert!(report.root.find("link/file4.txt").is_some());
    }
}
