use anyhow::{Context, Result};
use cgrep::output::{self, ColorMode};
use cgrep::query::{DirectoryScanner, ScanOptions};
use cgrep::utils::AppConfig;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use termcolor::StandardStream;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: cgrep '[search string]' [0-1.0 similarity] [directory]";

#[derive(Parser)]
#[command(name = "cgrep", version)]
#[command(about = "Approximate phrase search over the files of a directory")]
struct Cli {
    /// Phrase to search for
    query: String,

    /// Minimum bigram similarity of a match, from 0.0 to 1.0
    #[arg(allow_hyphen_values = true)]
    threshold: String,

    /// Directory whose files are searched (subdirectories are skipped)
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Number of files scanned in parallel (default: one per CPU)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Skip files larger than this many bytes (0 = no limit)
    #[arg(long, value_name = "BYTES")]
    max_filesize: Option<u64>,

    /// Skip files that look binary
    #[arg(long)]
    skip_binary: bool,

    /// Print results as JSON
    #[arg(long, conflicts_with_all = ["files_with_matches", "count"])]
    json: bool,

    /// Only print the paths of files with matches
    #[arg(short = 'l', long, conflicts_with = "count")]
    files_with_matches: bool,

    /// Only print the number of matches per file
    #[arg(short, long)]
    count: bool,

    /// Append each match's similarity score
    #[arg(long)]
    scores: bool,

    /// When to use colors
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Show a progress bar while scanning
    #[arg(long)]
    progress: bool,

    /// Log scan details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    init_tracing(cli.verbose);

    // Ensure threshold could be parsed
    let threshold = match cli.threshold.trim().parse::<f32>() {
        Ok(t) if !t.is_nan() => t,
        _ => {
            println!("Second argument must be a floating-point number.");
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("{:#}; using default settings", e);
        AppConfig::default()
    });

    let mut options = ScanOptions::from_config(&config, threshold);
    if let Some(jobs) = cli.jobs {
        options.jobs = jobs;
    }
    if let Some(limit) = cli.max_filesize {
        options.max_file_size = (limit > 0).then_some(limit);
    }
    options.skip_binary |= cli.skip_binary;
    options.progress = cli.progress;

    let results = DirectoryScanner::new(options)
        .scan_scored(&cli.query, &cli.directory)
        .with_context(|| format!("Failed to search {}", cli.directory.display()))?;

    let color = cli.color.unwrap_or(config.color);
    let stdout = StandardStream::stdout(color.choice_for_stdout());
    let mut out = stdout.lock();

    if cli.json {
        output::print_json(&mut out, &results)?;
    } else if cli.files_with_matches {
        output::print_files_only(&mut out, &results)?;
    } else if cli.count {
        output::print_match_counts(&mut out, &results)?;
    } else {
        output::print_matches(&mut out, &results, cli.scores)?;
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings, or debug with `--verbose`)
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
