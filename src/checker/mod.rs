//! Checker module for link status resolution
//!
//! This module contains the core checking logic, including:
//! - HEAD-request resolution with redirect-chain capture
//! - The run-scoped resolution cache
//! - Randomized request throttling
//! - Aggregation of results into per-document reports

mod aggregator;
mod cache;
mod resolver;
mod throttle;

pub use aggregator::{aggregate, Aggregation};
pub use cache::ResolutionCache;
pub use resolver::{
    build_http_client, EmptyChain, HttpResolver, ResolutionChain, ResolutionStep, Resolver,
    RESOLUTION_FAILURE_REASON,
};
pub use throttle::Throttle;

use crate::config::Config;
use crate::document::{extract_links_from_corpus, find_documents, CorpusLinks, DocumentLinks};
use crate::CheckError;
use std::path::Path;

/// Documents found under a target and the outcome of checking them
#[derive(Debug, Clone)]
pub struct CheckRun {
    pub corpus: CorpusLinks,
    pub aggregation: Aggregation,
}

/// Checks every link in `documents` using configured HTTP resolution
///
/// This is the main entry point for a check run. It builds the resolver
/// and throttle from `config` and starts from an empty cache.
pub async fn check_documents(
    config: &Config,
    documents: &[DocumentLinks],
) -> crate::Result<Aggregation> {
    let resolver = HttpResolver::new(&config.checker, &config.user_agent)?;
    let throttle = Throttle::from_config(&config.throttle);
    Ok(aggregate(documents, &resolver, &throttle, ResolutionCache::new()).await)
}

/// Finds, extracts and checks every document under `target`
///
/// A missing target or an unreadable directory is fatal; documents that
/// fail to parse are skipped and listed in `corpus.skipped`.
pub async fn check_target(config: &Config, target: &Path) -> crate::Result<CheckRun> {
    if !target.exists() {
        return Err(CheckError::MissingTarget(target.to_path_buf()));
    }

    let paths = find_documents(target)?;
    tracing::info!("Found {} documents in {}", paths.len(), target.display());

    let corpus = extract_links_from_corpus(&paths, &config.checker.proxy_suffix);
    let aggregation = check_documents(config, &corpus.documents).await?;

    Ok(CheckRun {
        corpus,
        aggregation,
    })
}
