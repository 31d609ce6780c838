//! JSON and CSV report files

use crate::config::OutputConfig;
use crate::report::{
    extract_redirects, flatten, DocumentReport, RedirectRecord, ReportResult, ReportRow,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// A row type with a fixed CSV header
pub trait CsvRecord: Serialize {
    const HEADER: &'static [&'static str];
}

impl CsvRecord for ReportRow {
    const HEADER: &'static [&'static str] = &[
        "file", "code", "title", "item", "session", "linktext", "link", "error",
    ];
}

impl CsvRecord for RedirectRecord {
    const HEADER: &'static [&'static str] = &["itemtitle", "file", "session", "old_url", "new_url"];
}

/// Writes reports as a JSON array
pub fn write_reports_json(path: &Path, reports: &[DocumentReport]) -> ReportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, reports)?;
    writer.flush()?;
    Ok(())
}

/// Reads reports previously written by [`write_reports_json`]
pub fn read_reports_json(path: &Path) -> ReportResult<Vec<DocumentReport>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes rows as CSV; the header is written even when there are no rows
pub fn write_csv<T: CsvRecord>(path: &Path, rows: &[T]) -> ReportResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(T::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Counts of what [`write_check_outputs`] wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCounts {
    pub all_rows: usize,
    pub broken_rows: usize,
    pub redirects: usize,
}

/// Writes every report file of a check run into the output directory
///
/// Full and failures-only reports are written as JSON and flattened CSV,
/// followed by the redirect report derived from the full reports when
/// `redirect_report` is set. The output directory is created if needed.
pub fn write_check_outputs(
    output: &OutputConfig,
    reports: &[DocumentReport],
    failures: &[DocumentReport],
    redirect_report: bool,
) -> ReportResult<OutputCounts> {
    std::fs::create_dir_all(&output.directory)?;

    write_reports_json(&output.path_for(&output.all_json), reports)?;
    write_reports_json(&output.path_for(&output.broken_json), failures)?;

    let all_rows = flatten(reports);
    write_csv(&output.path_for(&output.all_csv), &all_rows)?;

    let broken_rows = flatten(failures);
    write_csv(&output.path_for(&output.broken_csv), &broken_rows)?;

    let redirects = if redirect_report {
        let redirects = extract_redirects(reports);
        write_csv(&output.path_for(&output.redirects_csv), &redirects)?;
        redirects
    } else {
        Vec::new()
    };

    tracing::info!(
        "Wrote reports to {} ({} links, {} broken, {} redirects)",
        output.directory.display(),
        all_rows.len(),
        broken_rows.len(),
        redirects.len()
    );

    Ok(OutputCounts {
        all_rows: all_rows.len(),
        broken_rows: broken_rows.len(),
        redirects: redirects.len(),
    })
}
