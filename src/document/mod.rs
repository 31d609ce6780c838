//! Document module: parsing course documents and extracting their links
//!
//! This module contains:
//! - Cleaning and parsing raw document text into a navigable tree
//! - Extracting course metadata and per-session anchors
//! - Corpus-level extraction with skip-and-continue for malformed files

mod corpus;
mod extract;
mod parser;
mod sections;
pub mod tree;

pub use corpus::{
    extract_links_from_corpus, find_documents, CorpusLinks, SkippedDocument, DOCUMENT_SUFFIX,
};
pub use extract::{extract_links, extract_metadata, BACK_MATTER};
pub use parser::{clean_document, load_document, parse_document, CLEANUP_DIRECTIVES};
pub use sections::{Section, Sections};

use serde::{Deserialize, Serialize};

/// Default institutional proxy suffix removed from link hosts
pub const DEFAULT_PROXY_SUFFIX: &str = ".libezproxy.open.ac.uk";

/// One anchor found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// Flattened anchor text
    pub display_text: String,

    /// The href with any proxy suffix removed from its host; never empty
    pub normalized_url: String,

    /// The href exactly as written
    pub raw_url: String,
}

/// Course and item identification for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub course_code: String,
    pub course_title: String,
    pub item_title: String,
    #[serde(rename = "file")]
    pub source_file_path: String,
}

/// Every link of one document, grouped by section title
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLinks {
    pub metadata: DocumentMetadata,
    pub sections: Sections<LinkOccurrence>,
}
