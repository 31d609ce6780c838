use crate::report::DocumentReport;
use serde::{Deserialize, Serialize};

/// A link that permanently redirects to a working destination
///
/// Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    pub itemtitle: String,
    pub file: String,
    pub session: String,
    pub old_url: String,
    pub new_url: String,
}

/// Finds links that are safe to rewrite to their final destination
///
/// A link qualifies when its chain has at least two steps, ends in a 200,
/// and contains a successful 301 hop. Each qualifying entry yields one
/// record, from the first hop's URL to the terminal hop's URL.
pub fn extract_redirects(reports: &[DocumentReport]) -> Vec<RedirectRecord> {
    let mut redirects = Vec::new();

    for report in reports {
        for section in &report.sections {
            for entry in &section.links {
                let chain = &entry.chain;
                if chain.len() < 2 || chain.terminal_status() != Some(200) {
                    continue;
                }

                let Some(hop) = chain
                    .steps()
                    .iter()
                    .position(|step| step.ok && step.status_code == Some(301))
                else {
                    continue;
                };

                tracing::trace!(
                    "Permanent redirect at hop {} for {}",
                    hop,
                    chain.first().resolved_url
                );
                redirects.push(RedirectRecord {
                    itemtitle: report.metadata.item_title.clone(),
                    file: report.metadata.source_file_path.clone(),
                    session: section.title.clone(),
                    old_url: chain.first().resolved_url.clone(),
                    new_url: chain.terminal().resolved_url.clone(),
                });
            }
        }
    }

    redirects
}
