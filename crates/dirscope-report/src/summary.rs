//! Numeric summary of a scan.

use std::fmt::Write as _;

use dirscope_core::Statistics;

use crate::format_size;

/// Number of extensions listed under "File types".
pub const TOP_EXTENSIONS: usize = 10;

/// Render totals, per-extension breakdown and largest files.
pub fn render_summary(stats: &Statistics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total files: {}", format_number(stats.total_files));
    let _ = writeln!(
        out,
        "Total directories: {}",
        format_number(stats.total_directories)
    );
    let _ = writeln!(
        out,
        "Total size: {} bytes ({})",
        format_number(stats.total_size_bytes),
        format_size(stats.total_size_bytes)
    );
    let _ = writeln!(out, "Max depth: {}", stats.max_depth);

    if !stats.by_extension.is_empty() {
        out.push_str("\nFile types:\n");
        for (ext, ext_stats) in stats.extensions_by_count().into_iter().take(TOP_EXTENSIONS) {
            let _ = writeln!(
                out,
                "  {}: {} {} ({})",
                extension_label(ext),
                format_number(ext_stats.file_count),
                plural(ext_stats.file_count, "file", "files"),
                format_size(ext_stats.byte_total)
            );
        }
    }

    if !stats.largest_files.is_empty() {
        out.push_str("\nLargest files:\n");
        for file in &stats.largest_files {
            let _ = writeln!(out, "  {}: {}", file.path, format_size(file.size));
        }
    }

    out
}

/// Display form of an extension key.
pub fn extension_label(ext: &str) -> String {
    if ext.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{ext}")
    }
}

/// Format a count with thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

fn plural<'a>(n: u64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
