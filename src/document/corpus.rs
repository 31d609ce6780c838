use crate::document::extract::extract_links;
use crate::document::parser::load_document;
use crate::document::DocumentLinks;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File suffix of documents picked up from a directory
pub const DOCUMENT_SUFFIX: &str = ".xml";

/// A document that could not be loaded
#[derive(Debug, Clone)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Links extracted from every loadable document in a corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusLinks {
    /// One entry per loaded document, in input order
    pub documents: Vec<DocumentLinks>,

    /// Union of every normalized URL seen across the corpus
    pub urls: BTreeSet<String>,

    /// Documents that failed to load or parse
    pub skipped: Vec<SkippedDocument>,
}

impl CorpusLinks {
    /// Total number of link occurrences across all documents
    pub fn link_count(&self) -> usize {
        self.documents
            .iter()
            .map(|doc| doc.sections.entry_count())
            .sum()
    }
}

/// Lists the documents to check under `target`
///
/// A file target is returned as-is; a directory yields its `.xml` files
/// (non-recursive), sorted by path.
pub fn find_documents(target: &Path) -> std::io::Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut docs = Vec::new();
    for entry in std::fs::read_dir(target)? {
        let path = entry?.path();
        let is_document = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX));
        if is_document {
            docs.push(path);
        }
    }
    docs.sort();
    Ok(docs)
}

/// Extracts links from every document, skipping ones that fail to load
///
/// Per-document link lists are never deduplicated against each other:
/// a URL cited in five documents yields five occurrences. The URL set is
/// the corpus-wide union, used to plan resolution.
pub fn extract_links_from_corpus(paths: &[PathBuf], proxy_suffix: &str) -> CorpusLinks {
    let mut corpus = CorpusLinks::default();

    for path in paths {
        let root = match load_document(path) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!("Skipping document: {}", e);
                corpus.skipped.push(SkippedDocument {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let mut doc = extract_links(&root, proxy_suffix);
        doc.metadata.source_file_path = path.display().to_string();

        for section in &doc.sections {
            for link in &section.links {
                corpus.urls.insert(link.normalized_url.clone());
            }
        }

        tracing::debug!(
            "Extracted {} links from {}",
            doc.sections.entry_count(),
            path.display()
        );
        corpus.documents.push(doc);
    }

    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOC_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Item><CourseCode>A1</CourseCode>
  <Session><Title>S1</Title>
    <a href="https://example.com/shared">Shared</a>
    <a href="https://example.com/only-a">Only A</a>
  </Session>
</Item>"#;

    const DOC_B: &str = r#"<Item><CourseCode>B1</CourseCode>
  <Session><Title>S1</Title>
    <a href="https://example.com/shared">Shared again</a>
    <a>No href</a>
  </Session>
</Item>"#;

    fn write_corpus(dir: &TempDir) {
        fs::write(dir.path().join("a.xml"), DOC_A).unwrap();
        fs::write(dir.path().join("b.xml"), DOC_B).unwrap();
        fs::write(dir.path().join("broken.xml"), "<Item><Session>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    }

    #[test]
    fn test_find_documents_in_directory() {
        let dir = TempDir::new().unwrap();
        write_corpus(&dir);

        let docs = find_documents(dir.path()).unwrap();
        let names: Vec<String> = docs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.xml", "b.xml", "broken.xml"]);
    }

    #[test]
    fn test_find_documents_single_file() {
        let dir = TempDir::new().unwrap();
        write_corpus(&dir);

        let file = dir.path().join("a.xml");
        assert_eq!(find_documents(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_corpus_extraction_skips_malformed() {
        let dir = TempDir::new().unwrap();
        write_corpus(&dir);

        let paths = find_documents(dir.path()).unwrap();
        let corpus = extract_links_from_corpus(&paths, ".libezproxy.open.ac.uk");

        assert_eq!(corpus.documents.len(), 2);
        assert_eq!(corpus.skipped.len(), 1);
        assert!(corpus.skipped[0].path.ends_with("broken.xml"));
    }

    #[test]
    fn test_corpus_keeps_occurrences_and_unions_urls() {
        let dir = TempDir::new().unwrap();
        write_corpus(&dir);

        let paths = find_documents(dir.path()).unwrap();
        let corpus = extract_links_from_corpus(&paths, ".libezproxy.open.ac.uk");

        assert_eq!(corpus.link_count(), 3);
        assert_eq!(corpus.urls.len(), 2);
        assert!(corpus.urls.contains("https://example.com/shared"));
        assert!(corpus.documents[0]
            .metadata
            .source_file_path
            .ends_with("a.xml"));
        assert_eq!(corpus.documents[1].metadata.course_code, "B1");
    }
}
