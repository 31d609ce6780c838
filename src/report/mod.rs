//! Report module for turning check results into output artifacts
//!
//! This module handles:
//! - The per-document report model (full and failures-only)
//! - Flattening reports into tabular rows
//! - Finding permanent redirects worth rewriting
//! - Writing and reading JSON/CSV reports
//! - The end-of-run summary

mod flatten;
mod redirects;
mod summary;
mod writer;

pub use flatten::{flatten, ReportRow};
pub use redirects::{extract_redirects, RedirectRecord};
pub use summary::{print_summary, ArchiveSummary, RunSummary};
pub use writer::{
    read_reports_json, write_check_outputs, write_csv, write_reports_json, CsvRecord, OutputCounts,
};

use crate::checker::ResolutionChain;
use crate::document::{DocumentMetadata, Sections};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while writing or reading reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// One checked link occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(rename = "text")]
    pub display_text: String,

    /// Normalized URL that was resolved
    pub url: String,

    pub chain: ResolutionChain,

    /// Equal to the terminal step's `ok`
    pub ok: bool,
}

/// Checked links of one document, grouped by section
///
/// The same shape serves both the full report and the failures-only
/// report; the latter keeps only failing entries and non-empty sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub metadata: DocumentMetadata,
    pub sections: Sections<LinkEntry>,
}
