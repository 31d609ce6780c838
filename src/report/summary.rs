//! End-of-run summary
//!
//! Collects the counters and URL lists of a `check` run and prints them
//! to stdout once every output has been written.

use crate::archive::{ArchiveOutcome, ArchiveSelection, ScreenshotOutcome};
use crate::document::SkippedDocument;
use chrono::{DateTime, Utc};

/// What happened to the URLs offered for archival
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub archived: Vec<String>,
    pub not_archived: Vec<String>,
    pub excluded: Vec<String>,
    pub unresolved: Vec<String>,
}

impl ArchiveSummary {
    /// Splits submission outcomes and carries over the selector's leftovers
    pub fn from_outcomes(selection: ArchiveSelection, outcomes: &[ArchiveOutcome]) -> Self {
        let (archived, not_archived): (Vec<_>, Vec<_>) =
            outcomes.iter().partition(|outcome| outcome.archived);

        Self {
            archived: archived.into_iter().map(|o| o.url.clone()).collect(),
            not_archived: not_archived.into_iter().map(|o| o.url.clone()).collect(),
            excluded: selection.excluded,
            unresolved: selection.unresolved,
        }
    }
}

/// Statistics for one `check` run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// SHA-256 of the configuration file, when one was loaded
    pub config_hash: Option<String>,

    pub documents_checked: usize,
    pub skipped: Vec<SkippedDocument>,

    /// Link occurrences across all documents
    pub links: usize,
    pub distinct_urls: usize,
    pub broken_links: usize,
    pub redirects: usize,

    /// Present only when archival was requested
    pub archive: Option<ArchiveSummary>,

    /// Present only when screenshots were requested
    pub screenshots: Option<Vec<ScreenshotOutcome>>,
}

impl RunSummary {
    pub fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            config_hash: None,
            documents_checked: 0,
            skipped: Vec::new(),
            links: 0,
            distinct_urls: 0,
            broken_links: 0,
            redirects: 0,
            archive: None,
            screenshots: None,
        }
    }

    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
    }

    /// Wall-clock duration, if the run has finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

fn print_url_list(heading: &str, urls: &[String]) {
    println!("{} ({}):", heading, urls.len());
    for url in urls {
        println!("  - {}", url);
    }
    println!();
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Link Check Summary ===\n");

    println!("Run:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    if let Some(finished) = summary.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = summary.duration() {
        println!(
            "  Duration: {}.{:03}s",
            duration.num_seconds(),
            duration.num_milliseconds() % 1000
        );
    }
    if let Some(hash) = &summary.config_hash {
        println!("  Config hash: {}", hash);
    }
    println!();

    println!("Overview:");
    println!("  Documents checked: {}", summary.documents_checked);
    println!("  Documents skipped: {}", summary.skipped.len());
    println!("  Links found: {}", summary.links);
    println!("  Distinct URLs: {}", summary.distinct_urls);
    println!("  Broken links: {}", summary.broken_links);
    println!("  Permanent redirects: {}", summary.redirects);
    println!();

    if !summary.skipped.is_empty() {
        println!("Skipped Documents:");
        for doc in &summary.skipped {
            println!("  - {}: {}", doc.path.display(), doc.reason);
        }
        println!();
    }

    if let Some(archive) = &summary.archive {
        print_url_list("Archived", &archive.archived);
        print_url_list("Not archived", &archive.not_archived);
        print_url_list("Excluded", &archive.excluded);
        print_url_list("Unresolved", &archive.unresolved);
    }

    if let Some(screenshots) = &summary.screenshots {
        let captured = screenshots.iter().filter(|s| s.captured).count();
        println!("Screenshots: {}/{} captured", captured, screenshots.len());
        for shot in screenshots.iter().filter(|s| !s.captured) {
            println!("  - failed: {}", shot.url);
        }
        println!();
    }

    let success_rate = if summary.links > 0 {
        ((summary.links - summary.broken_links) as f64 / summary.links as f64) * 100.0
    } else {
        0.0
    };
    println!("Link success rate: {:.1}%", success_rate);
}
