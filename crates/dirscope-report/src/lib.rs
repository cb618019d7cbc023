//! Rendering and export for dirscope scans.
//!
//! Everything here consumes a finished [`Node`](dirscope_core::Node) tree or
//! [`Statistics`](dirscope_core::Statistics) snapshot; nothing touches the
//! filesystem except [`write_json`].

pub mod export;
pub mod summary;
pub mod tree;

pub use export::{DEFAULT_EXPORT_FILE, ExportError, to_json, write_json};
pub use summary::{TOP_EXTENSIONS, extension_label, format_number, render_summary};
pub use tree::{TreeOptions, TreeRenderer, render_tree};

/// Format a byte count with binary units.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
