//! File and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Relative path used for the scan root.
pub const ROOT_PATH: &str = ".";

/// Kind of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Anything that is not a directory.
    File,
    /// Directory.
    Directory,
}

/// Type-specific payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file (or unfollowed symlink).
    File {
        /// Size in bytes.
        size: u64,
    },
    /// Directory.
    Directory {
        /// Surviving children in listing order.
        children: Vec<Node>,
        /// Why the directory could not be listed, if it could not.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// A single file or directory that survived the ignore filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Path from the scan root, always `/`-separated. The root is `"."`.
    #[serde(rename = "path")]
    pub relative_path: String,

    /// Node type and associated data.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Create a new file node.
    pub fn new_file(
        name: impl Into<CompactString>,
        relative_path: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            kind: NodeKind::File { size },
        }
    }

    /// Create a new, empty directory node.
    pub fn new_directory(name: impl Into<CompactString>, relative_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            kind: NodeKind::Directory {
                children: Vec::new(),
                error: None,
            },
        }
    }

    /// Create the root node for a scan.
    pub fn root(name: impl Into<CompactString>) -> Self {
        Self::new_directory(name, ROOT_PATH)
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Whether this is the scan root.
    pub fn is_root(&self) -> bool {
        self.relative_path == ROOT_PATH
    }

    /// Entry type of this node.
    pub fn entry_type(&self) -> EntryType {
        match self.kind {
            NodeKind::File { .. } => EntryType::File,
            NodeKind::Directory { .. } => EntryType::Directory,
        }
    }

    /// File size, `None` for directories.
    pub fn size(&self) -> Option<u64> {
        match self.kind {
            NodeKind::File { size } => Some(size),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Direct children. Empty for files.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children.as_slice(),
            NodeKind::File { .. } => &[],
        }
    }

    /// Append a child. Has no effect on file nodes.
    pub fn push_child(&mut self, child: Node) {
        if let NodeKind::Directory { children, .. } = &mut self.kind {
            children.push(child);
        }
    }

    /// Listing error recorded for this directory.
    pub fn error(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Directory { error, .. } => error.as_deref(),
            NodeKind::File { .. } => None,
        }
    }

    /// Record a listing error. Has no effect on file nodes.
    pub fn set_error(&mut self, message: impl Into<String>) {
        if let NodeKind::Directory { error, .. } = &mut self.kind {
            *error = Some(message.into());
        }
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Count all nodes below this one as `(files, directories)`.
    pub fn descendant_counts(&self) -> (u64, u64) {
        let mut files = 0;
        let mut dirs = 0;
        for child in self.children() {
            let (f, d) = child.descendant_counts();
            files += f;
            dirs += d;
            if child.is_dir() {
                dirs += 1;
            } else {
                files += 1;
            }
        }
        (files, dirs)
    }

    /// Sum of file sizes below this node (or the file's own size).
    pub fn total_size(&self) -> u64 {
        match &self.kind {
            NodeKind::File { size } => *size,
            NodeKind::Directory { children, .. } => children.iter().map(Node::total_size).sum(),
        }
    }

    /// Find a descendant by relative path.
    pub fn find(&self, relative_path: &str) -> Option<&Node> {
        if self.relative_path == relative_path {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find(relative_path))
    }

    /// Visit this node and every descendant, depth-first, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
