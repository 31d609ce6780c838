use crate::report::DocumentReport;
use serde::{Deserialize, Serialize};

/// One row of the tabular link report
///
/// Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub file: String,
    pub code: String,
    pub title: String,
    pub item: String,
    pub session: String,
    pub linktext: String,
    pub link: String,
    /// Reason phrase of the terminal step
    pub error: String,
}

/// Flattens reports into one row per (document, section, link)
///
/// Rows are sorted by source file; the sort is stable, so rows of the
/// same file keep discovery order.
pub fn flatten(reports: &[DocumentReport]) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = reports
        .iter()
        .flat_map(|report| {
            let metadata = &report.metadata;
            report.sections.iter().flat_map(move |section| {
                section.links.iter().map(move |entry| ReportRow {
                    file: metadata.source_file_path.clone(),
                    code: metadata.course_code.clone(),
                    title: metadata.course_title.clone(),
                    item: metadata.item_title.clone(),
                    session: section.title.clone(),
                    linktext: entry.display_text.clone(),
                    link: entry.url.clone(),
                    error: entry.chain.terminal().reason.clone(),
                })
            })
        })
        .collect();

    rows.sort_by(|a, b| a.file.cmp(&b.file));
    rows
}
