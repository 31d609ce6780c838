//! Document aggregation - resolves every link of every document
//!
//! For each document, section and link (in that order):
//! 1. Pause for the throttle delay, unless the URL is already cached
//! 2. Obtain the chain through the run's [`ResolutionCache`]
//! 3. Record the entry in the full report, and in the failure report
//!    when the terminal step did not succeed

use crate::checker::cache::ResolutionCache;
use crate::checker::resolver::Resolver;
use crate::checker::throttle::Throttle;
use crate::document::{DocumentLinks, Sections};
use crate::report::{DocumentReport, LinkEntry};
use std::collections::HashSet;
use std::time::Instant;

/// How many resolutions between progress lines
const PROGRESS_INTERVAL: usize = 10;

/// Outcome of checking a corpus
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Every link of every document
    pub reports: Vec<DocumentReport>,

    /// Only failing links; sections without failures are omitted
    pub failures: Vec<DocumentReport>,

    /// Final cache state, reused for archival and screenshots
    pub cache: ResolutionCache,
}

impl Aggregation {
    /// Number of failing link occurrences across all documents
    pub fn failure_count(&self) -> usize {
        self.failures
            .iter()
            .map(|report| report.sections.entry_count())
            .sum()
    }
}

/// Resolves every link in `documents`, building full and failure reports
///
/// `cache` is consumed and returned in the result, so a caller can seed
/// it or hand the final state to later passes. The throttle delay runs
/// only before a cache miss.
pub async fn aggregate<R>(
    documents: &[DocumentLinks],
    resolver: &R,
    throttle: &Throttle,
    mut cache: ResolutionCache,
) -> Aggregation
where
    R: Resolver + ?Sized,
{
    let pending = count_pending(documents, &cache);
    let start_time = Instant::now();
    let mut resolved = 0;

    let mut reports = Vec::with_capacity(documents.len());
    let mut failures = Vec::with_capacity(documents.len());

    tracing::info!(
        "Checking {} documents ({} URLs to resolve)",
        documents.len(),
        pending
    );

    for doc in documents {
        tracing::info!(
            "Checking {} ({} links)",
            doc.metadata.source_file_path,
            doc.sections.entry_count()
        );

        let mut sections = Sections::new();
        let mut failed_sections = Sections::new();

        for section in &doc.sections {
            tracing::debug!("Section '{}': {} links", section.title, section.links.len());

            let mut entries = Vec::with_capacity(section.links.len());
            let mut failed = Vec::new();

            for link in &section.links {
                let url = link.normalized_url.as_str();

                if !cache.contains(url) {
                    throttle.pause().await;
                    tracing::debug!("Resolving {}", url);
                    resolved += 1;

                    if resolved % PROGRESS_INTERVAL == 0 {
                        let rate = resolved as f64 / start_time.elapsed().as_secs_f64();
                        tracing::info!(
                            "Progress: {}/{} URLs resolved, {:.2} URLs/sec",
                            resolved,
                            pending,
                            rate
                        );
                    }
                }

                let chain = cache.get_or_resolve(url, resolver).await;
                let entry = LinkEntry {
                    ok: chain.is_ok(),
                    display_text: link.display_text.clone(),
                    url: link.normalized_url.clone(),
                    chain,
                };

                if !entry.ok {
                    failed.push(entry.clone());
                }
                entries.push(entry);
            }

            if !failed.is_empty() {
                failed_sections.insert(section.title.clone(), failed);
            }
            sections.insert(section.title.clone(), entries);
        }

        reports.push(DocumentReport {
            metadata: doc.metadata.clone(),
            sections,
        });
        failures.push(DocumentReport {
            metadata: doc.metadata.clone(),
            sections: failed_sections,
        });
    }

    tracing::info!(
        "Resolved {} URLs in {:?}",
        cache.resolutions(),
        start_time.elapsed()
    );

    Aggregation {
        reports,
        failures,
        cache,
    }
}

/// Distinct URLs in the corpus not yet present in the cache
fn count_pending(documents: &[DocumentLinks], cache: &ResolutionCache) -> usize {
    documents
        .iter()
        .flat_map(|doc| doc.sections.iter())
        .flat_map(|section| section.links.iter())
        .map(|link| link.normalized_url.as_str())
        .filter(|url| !cache.contains(url))
        .collect::<HashSet<_>>()
        .len()
}
