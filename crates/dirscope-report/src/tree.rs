//! Console tree diagram.

use std::io::{self, Write};

use dirscope_core::Node;

use crate::format_size;

/// Options for [`TreeRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Append human-readable sizes to file lines.
    pub show_sizes: bool,
}

/// Draws a [`Node`] tree with `├── `, `└── ` and `│   ` connectors.
///
/// The root's name is printed alone on the first line and its children
/// follow in stored order.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    options: TreeOptions,
}

impl TreeRenderer {
    pub fn new(options: TreeOptions) -> Self {
        Self { options }
    }

    /// Render the whole tree into a string.
    pub fn render(&self, root: &Node) -> String {
        let mut output = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(root, &mut output);
        String::from_utf8_lossy(&output).into_owned()
    }

    /// Render the tree into `out`.
    pub fn write<W: Write>(&self, root: &Node, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.label(root))?;
        self.write_children(root, out, "")
    }

    fn write_children<W: Write>(
        &self,
        node: &Node,
        out: &mut W,
        prefix: &str,
    ) -> io::Result<()> {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let is_last = i + 1 == children.len();
            let connector = if is_last { "└── " } else { "├── " };
            writeln!(out, "{prefix}{connector}{}", self.label(child))?;

            if child.is_dir() {
                let extension = if is_last { "    " } else { "│   " };
                self.write_children(child, out, &format!("{prefix}{extension}"))?;
            }
        }
        Ok(())
    }

    fn label(&self, node: &Node) -> String {
        let mut label = node.name.to_string();
        if let Some(error) = node.error() {
            label.push_str(&format!(" [{error}]"));
        }
        if self.options.show_sizes {
            if let Some(size) = node.size() {
                label.push_str(&format!(" ({})", format_size(size)));
            }
        }
        label
    }
}

/// Render `root` with default options.
pub fn render_tree(root: &Node) -> String {
    TreeRenderer::default().render(root)
}
