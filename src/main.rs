//! ouxml-linkcheck main entry point
//!
//! This is the command-line interface for checking links in OU-XML
//! course documents.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use ouxml_linkcheck::archive::{
    capture_all, select_for_archival, submit_all, ArchivePolicy, CommandScreenshotter, WebArchiver,
};
use ouxml_linkcheck::checker::{check_target, CheckRun, Throttle};
use ouxml_linkcheck::config::{load_config_with_hash, Config};
use ouxml_linkcheck::report::{
    flatten, print_summary, read_reports_json, write_check_outputs, write_csv, ArchiveSummary,
    RunSummary,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// ouxml-linkcheck: broken link finder for OU-XML documents
///
/// Extracts every hyperlink from a set of course documents, follows each
/// one's redirect chain, and reports broken links and permanent redirects.
/// Working links can optionally be submitted to a web archive.
#[derive(Parser, Debug)]
#[command(name = "ouxml-linkcheck")]
#[command(version = "1.0.0")]
#[command(about = "Link checker for OU-XML course documents", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every link in a document or a directory of documents
    Check {
        /// OU-XML file, or directory of .xml files
        #[arg(value_name = "PATH")]
        target: PathBuf,

        /// Archive links that currently answer 200
        #[arg(short = 'a', long)]
        archive: bool,

        /// Archive every resolved link except 404s
        #[arg(short = 'A', long)]
        strong_archive: bool,

        /// Capture a screenshot of every resolved link
        #[arg(long)]
        screenshots: bool,

        /// Skip the permanent-redirect report
        #[arg(long)]
        no_redirects: bool,

        /// Directory for report files (overrides the config)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Flatten a saved JSON report into CSV
    BuildReport {
        /// JSON report written by a previous check
        #[arg(value_name = "JSON")]
        input: PathBuf,

        /// CSV destination (defaults to the input with a .csv extension)
        #[arg(short, long, value_name = "CSV")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) =
        load_configuration(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Check {
            target,
            archive,
            strong_archive,
            screenshots,
            no_redirects,
            output_dir,
        } => {
            let mut config = config;
            if let Some(dir) = output_dir {
                config.output.directory = dir;
            }

            let policy = if strong_archive {
                Some(ArchivePolicy::all_reachable())
            } else if archive {
                Some(ArchivePolicy::clean_links())
            } else {
                None
            };

            let options = CheckOptions {
                policy,
                screenshots,
                redirect_report: !no_redirects,
            };
            handle_check(&config, config_hash, &target, options).await
        }
        Command::BuildReport { input, output } => handle_build_report(&input, output),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ouxml_linkcheck=info,warn"),
            1 => EnvFilter::new("ouxml_linkcheck=debug,info"),
            2 => EnvFilter::new("ouxml_linkcheck=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, otherwise the built-in defaults
fn load_configuration(path: Option<&Path>) -> ouxml_linkcheck::Result<(Config, Option<String>)> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok((Config::default(), None));
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok((config, Some(hash)))
}

struct CheckOptions {
    policy: Option<ArchivePolicy>,
    screenshots: bool,
    redirect_report: bool,
}

/// Handles the check operation
async fn handle_check(
    config: &Config,
    config_hash: Option<String>,
    target: &Path,
    options: CheckOptions,
) -> Result<()> {
    let mut summary = RunSummary::started(Utc::now());
    summary.config_hash = config_hash;

    let CheckRun {
        corpus,
        aggregation,
    } = check_target(config, target)
        .await
        .with_context(|| format!("Failed to check {}", target.display()))?;

    summary.documents_checked = corpus.documents.len();
    summary.links = corpus.link_count();
    summary.distinct_urls = corpus.urls.len();
    summary.skipped = corpus.skipped;
    summary.broken_links = aggregation.failure_count();

    let counts = write_check_outputs(
        &config.output,
        &aggregation.reports,
        &aggregation.failures,
        options.redirect_report,
    )
    .with_context(|| {
        format!(
            "Failed to write reports to {}",
            config.output.directory.display()
        )
    })?;
    summary.redirects = counts.redirects;

    if let Some(policy) = &options.policy {
        let selection = select_for_archival(&aggregation.cache, policy);
        let archiver = WebArchiver::new(&config.archive, &config.user_agent)?;
        let throttle = Throttle::from_config(&config.throttle);

        tracing::info!("Submitting {} URLs for archival", selection.selected.len());
        let outcomes = submit_all(&archiver, &selection.selected, &throttle).await;
        summary.archive = Some(ArchiveSummary::from_outcomes(selection, &outcomes));
    }

    if options.screenshots {
        match CommandScreenshotter::from_config(&config.screenshot) {
            Some(screenshotter) => {
                let selection =
                    select_for_archival(&aggregation.cache, &ArchivePolicy::everything());
                let dir = config.output.path_for(&config.output.screenshots_dir);
                let outcomes = capture_all(&screenshotter, &selection.selected, &dir)
                    .await
                    .with_context(|| {
                        format!("Failed to create screenshot directory {}", dir.display())
                    })?;
                summary.screenshots = Some(outcomes);
            }
            None => {
                tracing::warn!("No screenshot command configured, skipping screenshots");
            }
        }
    }

    summary.finish(Utc::now());
    print_summary(&summary);

    Ok(())
}

/// Handles the build-report operation
fn handle_build_report(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension("csv"));

    let rows = build_report(input, &output).with_context(|| {
        format!(
            "Failed to build {} from {}",
            output.display(),
            input.display()
        )
    })?;

    println!("✓ Wrote {} rows to {}", rows, output.display());

    Ok(())
}

/// Flattens a saved JSON report into CSV, returning the row count
fn build_report(input: &Path, output: &Path) -> ouxml_linkcheck::Result<usize> {
    let reports = read_reports_json(input)?;
    let rows = flatten(&reports);
    write_csv(output, &rows)?;
    Ok(rows.len())
}
