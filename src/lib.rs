//! ouxml-linkcheck: link checking for OU-XML course documents
//!
//! This crate extracts hyperlinks from structured course-document XML,
//! resolves each link's live HTTP status (following redirect chains),
//! and produces reports of broken links, redirects worth rewriting, and
//! candidates for web-archive preservation.

pub mod archive;
pub mod checker;
pub mod config;
pub mod document;
pub mod report;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for link checking operations
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Target path does not exist: {}", .0.display())]
    MissingTarget(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while loading a single document
///
/// A document error is fatal for that document only; the run skips it
/// and continues with the rest of the corpus.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed document {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}

/// Result type alias for link checking operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use archive::{select_for_archival, ArchivePolicy, Archiver, ScreenshotService};
pub use checker::{
    aggregate, check_documents, check_target, Aggregation, CheckRun, HttpResolver,
    ResolutionCache, ResolutionChain, ResolutionStep, Resolver, Throttle,
};
pub use config::Config;
pub use document::{
    extract_links, extract_links_from_corpus, extract_metadata, parse_document, CorpusLinks,
    DocumentLinks, DocumentMetadata, LinkOccurrence,
};
pub use report::{DocumentReport, LinkEntry, ReportRow, RunSummary};
