//! mediasync - reconcile a media library on disk with its catalog records.
//!
//! Usage:
//!   msync scan [PATH]                      Walk the library and show counts
//!   msync snapshot [PATH] -o FILE          Export the library as a record snapshot
//!   msync diff [PATH] --records FILE       Compare the library with a snapshot
//!   msync stale --records FILE             List records under excluded directories
//!   msync --help                           Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use mediasync_analyze::{ChangeType, Diff, DiffConfig, DiffEngine, Stale, StaleFinder};
use mediasync_scan::{
    ExtensionFilter, FileFilter, FsTreeBuilder, GlobFilter, RecordSnapshot, RecordTreeBuilder,
    ScanConfig, Tree,
};

#[derive(Parser)]
#[command(
    name = "mediasync",
    version,
    about = "Reconcile a media library on disk with its catalog",
    long_about = "mediasync compares what is on disk with what the catalog records hold.\n\n\
                  It reports added, removed and moved directories and files, and lists \
                  catalog entries living under excluded directories."
)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the library and show a summary
    Scan {
        /// Library root
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export the library as a JSON record snapshot
    Snapshot {
        /// Library root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Compare the library with a record snapshot
    Diff {
        /// Library root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Record snapshot (JSON)
        #[arg(short, long)]
        records: PathBuf,

        /// Report every pending entry as a plain add/remove
        #[arg(long)]
        no_moves: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List records living under excluded directories
    Stale {
        /// Record snapshot (JSON)
        #[arg(short, long)]
        records: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Accepted file extensions (defaults to common media types)
    #[arg(short, long, value_delimiter = ',')]
    ext: Vec<String>,

    /// Accept files whose absolute path matches any of these globs
    #[arg(short, long, conflicts_with = "ext")]
    glob: Vec<String>,
}

impl FilterArgs {
    fn build(&self) -> Result<Box<dyn FileFilter>> {
        if !self.glob.is_empty() {
            let filter = GlobFilter::new(&self.glob).context("Invalid glob pattern")?;
            Ok(Box::new(filter))
        } else if !self.ext.is_empty() {
            Ok(Box::new(ExtensionFilter::new(&self.ext)))
        } else {
            Ok(Box::new(ExtensionFilter::media()))
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan { path, filter } => run_scan(&path, &filter)?,
        Command::Snapshot {
            path,
            output,
            filter,
        } => run_snapshot(&path, output, &filter)?,
        Command::Diff {
            path,
            records,
            no_moves,
            format,
            filter,
        } => run_diff(&path, &records, no_moves, format, &filter)?,
        Command::Stale { records, format } => run_stale(&records, format)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Walk the library root into a tree.
fn build_fs_tree(path: &Path, filter: &FilterArgs) -> Result<Tree> {
    let filter = filter.build()?;
    eprintln!("Scanning {}...", path.display());

    let config = ScanConfig::new(path);
    FsTreeBuilder::new()
        .build(&config, filter.as_ref())
        .context("Scan failed")
}

/// Load a record snapshot and rebuild the catalog tree from it.
fn build_record_tree(records: &Path) -> Result<Tree> {
    let json = std::fs::read_to_string(records)
        .with_context(|| format!("Failed to read {}", records.display()))?;
    let snapshot: RecordSnapshot =
        serde_json::from_str(&json).context("Invalid record snapshot")?;

    let tree = RecordTreeBuilder::new()
        .build(&snapshot, &snapshot)
        .context("Failed to build record tree")?;

    if !tree.warnings.is_empty() {
        eprintln!("{} warning(s) while loading records", tree.warnings.len());
    }
    Ok(tree)
}

/// Walk the library and display a summary.
fn run_scan(path: &Path, filter: &FilterArgs) -> Result<()> {
    let tree = build_fs_tree(path, filter)?;

    println!();
    println!("{}", "─".repeat(60));
    println!(" {}", path.display());
    println!(
        " {} media files, {} directories",
        tree.file_count(),
        tree.dir_count().saturating_sub(1)
    );
    println!("{}", "─".repeat(60));

    Ok(())
}

/// Export the library as a record snapshot.
fn run_snapshot(path: &Path, output: Option<PathBuf>, filter: &FilterArgs) -> Result<()> {
    let tree = build_fs_tree(path, filter)?;
    let json = serde_json::to_string_pretty(&RecordSnapshot::from_tree(&tree))?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Compare the library with a record snapshot.
fn run_diff(
    path: &Path,
    records: &Path,
    no_moves: bool,
    format: OutputFormat,
    filter: &FilterArgs,
) -> Result<()> {
    let fs_tree = build_fs_tree(path, filter)?;
    let db_tree = build_record_tree(records)?;

    let config = DiffConfig::builder()
        .detect_moves(!no_moves)
        .build()
        .context("Invalid diff configuration")?;
    let diff = DiffEngine::with_config(config).compare(&fs_tree, &db_tree);

    match format {
        OutputFormat::Text => print_diff(&diff),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
    }

    Ok(())
}

/// List records under excluded directories.
fn run_stale(records: &Path, format: OutputFormat) -> Result<()> {
    let db_tree = build_record_tree(records)?;
    let stale = StaleFinder::new().find_stales(&db_tree);

    match format {
        OutputFormat::Text => print_stale(&stale),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stale)?),
    }

    Ok(())
}

fn print_diff(diff: &Diff) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" Reconciliation Report ({} changes)", diff.total());
    println!("{}", "─".repeat(70));

    if diff.is_empty() {
        println!(" Library and catalog agree.");
        return;
    }

    let sections = [
        ChangeType::DirectoryAdded,
        ChangeType::DirectoryRemoved,
        ChangeType::DirectoryMoved,
        ChangeType::FileAdded,
        ChangeType::FileRemoved,
        ChangeType::FileMoved,
    ];
    for change_type in sections {
        let changes = diff.changes(change_type);
        if changes.is_empty() {
            continue;
        }
        println!();
        println!(" {} ({}):", change_type, changes.len());
        for change in changes {
            match &change.path2 {
                Some(to) => println!("   {} -> {}", change.path1, to),
                None => println!("   {}", change.path1),
            }
        }
    }
    println!();
}

fn print_stale(stale: &Stale) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" Stale Records");
    println!("{}", "─".repeat(70));

    if stale.is_empty() {
        println!(" No records under excluded directories.");
        return;
    }

    println!();
    println!(" Directories ({}):", stale.directories.len());
    for path in &stale.directories {
        println!("   {}", path);
    }
    println!();
    println!(" Files ({}):", stale.files.len());
    for path in &stale.files {
        println!("   {}", path);
    }
    println!();
}
