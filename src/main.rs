//! dirscope - Walk a directory tree, honor .dirignore and report what's left.
//!
//! Usage:
//!   dirscope [PATH]              Print tree and summary, export JSON
//!   dirscope tree [PATH]         Print the tree only
//!   dirscope stats [PATH]        Print statistics (text or JSON)
//!   dirscope export [PATH]       Export the tree as JSON
//!   dirscope --help              Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use dirscope_core::DEFAULT_TOP_N;
use dirscope_report::{
    DEFAULT_EXPORT_FILE, TreeOptions, TreeRenderer, render_summary, to_json, write_json,
};
use dirscope_scan::ignore_file::{self, DEFAULT_IGNORE_FILE, IgnoreLookup};
use dirscope_scan::{PatternSet, ScanConfig, ScanError, ScanReport, TreeWalker};

#[derive(Parser)]
#[command(
    name = "dirscope",
    version,
    about = "Directory tree scanner with .dirignore filtering",
    long_about = "dirscope walks a directory once, skipping anything matched by the \
                  patterns in ./.dirignore, then prints a tree, a summary and writes \
                  the surviving structure to directory_structure.json.\n\n\
                  Use subcommands to get just one of those outputs."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(flatten)]
    scan: ScanArgs,

    /// Show file sizes in the tree
    #[arg(short, long)]
    sizes: bool,

    /// Where to write the JSON export
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,

    /// Skip writing the JSON export
    #[arg(long)]
    no_export: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Options shared by every command that scans.
#[derive(Args, Clone)]
struct ScanArgs {
    /// Ignore file to use instead of ./.dirignore
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Do not load any ignore file
    #[arg(long, conflicts_with = "ignore_file")]
    no_ignore: bool,

    /// Descend at most this many levels below the root
    #[arg(short = 'L', long)]
    level: Option<usize>,

    /// Number of largest files to keep
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the directory tree
    Tree {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Show file sizes
        #[arg(short, long)]
        sizes: bool,
    },

    /// Print scan statistics
    Stats {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the directory tree to JSON
    Export {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.take() {
        Some(Command::Tree { path, scan, sizes }) => run_tree(&path, &scan, sizes),
        Some(Command::Stats { path, scan, format }) => run_stats(&path, &scan, format),
        Some(Command::Export { path, scan, output }) => run_export(&path, &scan, output),
        None => run_default(&cli),
    }
}

/// Log to stderr; RUST_LOG directives are honored on top of the base level.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Print tree and summary, then export.
fn run_default(cli: &Cli) -> Result<()> {
    eprintln!("Scanning directory: {}", cli.path.display());
    let report = scan(&cli.path, &cli.scan)?;

    println!();
    println!("Directory Structure:");
    println!("{}", "=".repeat(50));
    print!("{}", tree_renderer(cli.sizes).render(&report.root));

    println!();
    println!("{}", "=".repeat(50));
    print!("{}", render_summary(&report.stats));
    print_warning_count(&report);

    if !cli.no_export {
        write_json(&report.root, &cli.output).wrap_err("Export failed")?;
        println!();
        println!("Structure exported to {}", cli.output.display());
    }

    Ok(())
}

/// Print just the tree.
fn run_tree(path: &Path, args: &ScanArgs, sizes: bool) -> Result<()> {
    let report = scan(path, args)?;

    print!("{}", tree_renderer(sizes).render(&report.root));
    println!();
    println!(
        "{} directories, {} files",
        report.total_dirs(),
        report.total_files()
    );
    print_warning_count(&report);

    Ok(())
}

/// Print statistics.
fn run_stats(path: &Path, args: &ScanArgs, format: OutputFormat) -> Result<()> {
    let report = scan(path, args)?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_summary(&report.stats));
            println!("Scanned in {:.2}s", report.scan_duration.as_secs_f64());
            print_warning_count(&report);
        }
        OutputFormat::Json => {
            println!("{}", to_json(&report.stats)?);
        }
    }

    Ok(())
}

/// Export the tree to a file or stdout.
fn run_export(path: &Path, args: &ScanArgs, output: Option<PathBuf>) -> Result<()> {
    eprintln!("Scanning {}...", path.display());
    let report = scan(path, args)?;

    match output {
        Some(output_path) => {
            write_json(&report.root, &output_path).wrap_err("Export failed")?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{}", to_json(&report.root)?);
        }
    }

    Ok(())
}

/// Load patterns, build the configuration and run the scan.
fn scan(path: &Path, args: &ScanArgs) -> Result<ScanReport> {
    let patterns = load_patterns(args)?;

    let config = ScanConfig::builder()
        .root(path)
        .patterns(patterns)
        .max_depth(args.level)
        .top_n(args.top)
        .follow_symlinks(args.follow_links)
        .build()
        .map_err(ScanError::from)?;

    let report = TreeWalker::new(config).scan().wrap_err("Scan failed")?;
    Ok(report)
}

/// Find the ignore file in the working directory unless told otherwise.
///
/// An unreadable ignore file is reported and treated as empty.
fn load_patterns(args: &ScanArgs) -> Result<PatternSet> {
    if args.no_ignore {
        return Ok(PatternSet::new());
    }

    let lookup = match &args.ignore_file {
        Some(path) => ignore_file::load(path),
        None => {
            let cwd = std::env::current_dir().wrap_err("Cannot determine working directory")?;
            ignore_file::discover(&cwd, DEFAULT_IGNORE_FILE)
        }
    };

    match &lookup {
        IgnoreLookup::Loaded { path, patterns } => {
            eprintln!(
                "Using {} from: {} ({} patterns)",
                ignore_file_name(path),
                path.display(),
                patterns.len()
            );
        }
        IgnoreLookup::Missing { path } => {
            eprintln!("No {} file found", ignore_file_name(path));
        }
        IgnoreLookup::Failed { error } => {
            eprintln!("Warning: {error}; continuing without ignore patterns");
        }
    }

    Ok(lookup.into_patterns())
}

fn ignore_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_IGNORE_FILE.to_string())
}

fn tree_renderer(show_sizes: bool) -> TreeRenderer {
    TreeRenderer::new(TreeOptions { show_sizes })
}

fn print_warning_count(report: &ScanReport) {
    if report.has_warnings() {
        eprintln!();
        eprintln!("{} warning(s) during scan", report.warnings.len());
    }
}
