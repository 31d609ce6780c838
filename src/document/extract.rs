//! Link and metadata extraction from parsed documents
//!
//! # Document layout
//!
//! - `CourseCode`, `CourseTitle`, `ItemTitle` anywhere in the tree
//! - `Session` elements, each with a `Title` and any number of `<a href>` anchors
//! - an optional trailing `BackMatter` container with its own anchors

use crate::document::tree::{flatten_text, XmlElement};
use crate::document::{DocumentLinks, DocumentMetadata, LinkOccurrence, Sections};
use crate::url::strip_proxy_suffix;

/// Section key for anchors in the back matter
pub const BACK_MATTER: &str = "BackMatter";

/// Extracts course and item metadata
///
/// Missing elements yield empty strings. The source path is left empty;
/// corpus extraction fills it in.
pub fn extract_metadata(root: &XmlElement) -> DocumentMetadata {
    DocumentMetadata {
        course_code: flatten_text(root.find("CourseCode")),
        course_title: flatten_text(root.find("CourseTitle")),
        item_title: flatten_text(root.find("ItemTitle")),
        source_file_path: String::new(),
    }
}

/// Extracts every anchor, grouped by session title
///
/// Every occurrence is kept, repeats included, so failures can be
/// attributed to each place a link appears. Anchors without an href are
/// skipped. The back matter section is always present, possibly empty.
pub fn extract_links(root: &XmlElement, proxy_suffix: &str) -> DocumentLinks {
    let mut sections = Sections::new();

    for session in root.find_all("Session") {
        let title = flatten_text(session.find("Title"));
        sections.insert(title, collect_anchors(session, proxy_suffix));
    }

    let back_matter = root
        .find(BACK_MATTER)
        .map(|container| collect_anchors(container, proxy_suffix))
        .unwrap_or_default();
    sections.insert(BACK_MATTER, back_matter);

    DocumentLinks {
        metadata: extract_metadata(root),
        sections,
    }
}

fn collect_anchors(container: &XmlElement, proxy_suffix: &str) -> Vec<LinkOccurrence> {
    container
        .find_all("a")
        .filter_map(|anchor| {
            let href = anchor.attr("href").filter(|href| !href.is_empty())?;
            let normalized_url = strip_proxy_suffix(href, proxy_suffix);
            if normalized_url.is_empty() {
                return None;
            }
            Some(LinkOccurrence {
                display_text: flatten_text(Some(anchor)),
                normalized_url,
                raw_url: href.to_string(),
            })
        })
        .collect()
}
