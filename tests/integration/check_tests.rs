//! Full check runs over temporary document corpora

use crate::create_test_config;
use ouxml_linkcheck::archive::{select_for_archival, ArchivePolicy};
use ouxml_linkcheck::checker::check_documents;
use ouxml_linkcheck::document::{extract_links_from_corpus, find_documents};
use ouxml_linkcheck::report::{read_reports_json, write_check_outputs};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_document(dir: &Path, name: &str, item_title: &str, base_url: &str, paths: &[&str]) {
    let anchors: String = paths
        .iter()
        .map(|p| format!(r#"<Paragraph><a href="{}{}">Link to {}</a></Paragraph>"#, base_url, p, p))
        .collect();

    let text = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!--#set var="section" value="course" -->
<Item>
  <CourseCode>A111</CourseCode>
  <CourseTitle>Discovering the arts</CourseTitle>
  <ItemTitle>{}</ItemTitle>
  <Unit>
    <Session>
      <Title>Introduction</Title>
      {}
    </Session>
  </Unit>
</Item>"#,
        item_title, anchors
    );
    fs::write(dir.join(name), text).unwrap();
}

async fn mount_head(mock_server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_check_run_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let moved_location = format!("{}/moved-here", base_url);

    // Every distinct URL must be requested exactly once
    mount_head(&mock_server, "/shared", ResponseTemplate::new(200)).await;
    mount_head(&mock_server, "/missing", ResponseTemplate::new(404)).await;
    mount_head(&mock_server, "/a-only", ResponseTemplate::new(200)).await;
    mount_head(&mock_server, "/b-only", ResponseTemplate::new(200)).await;
    mount_head(
        &mock_server,
        "/moved",
        ResponseTemplate::new(301).insert_header("location", moved_location.as_str()),
    )
    .await;
    mount_head(&mock_server, "/moved-here", ResponseTemplate::new(200)).await;

    let corpus_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    write_document(
        corpus_dir.path(),
        "a.xml",
        "Week 1",
        &base_url,
        &["/shared", "/missing", "/a-only"],
    );
    write_document(
        corpus_dir.path(),
        "b.xml",
        "Week 2",
        &base_url,
        &["/shared", "/b-only", "/moved"],
    );
    fs::write(corpus_dir.path().join("c.xml"), "<Item><Session></Item>").unwrap();
    fs::write(corpus_dir.path().join("notes.txt"), "not a document").unwrap();

    let config = create_test_config(output_dir.path().to_path_buf());

    let paths = find_documents(corpus_dir.path()).unwrap();
    assert_eq!(paths.len(), 3);

    let corpus = extract_links_from_corpus(&paths, &config.checker.proxy_suffix);
    assert_eq!(corpus.documents.len(), 2);
    assert_eq!(corpus.skipped.len(), 1);
    assert!(corpus.skipped[0].path.ends_with("c.xml"));
    assert_eq!(corpus.link_count(), 6);
    assert_eq!(corpus.urls.len(), 5);

    let aggregation = check_documents(&config, &corpus.documents).await.unwrap();
    assert_eq!(aggregation.cache.resolutions(), 5);
    assert_eq!(aggregation.failure_count(), 1);

    let counts =
        write_check_outputs(&config.output, &aggregation.reports, &aggregation.failures, true)
            .unwrap();
    assert_eq!(counts.all_rows, 6);
    assert_eq!(counts.broken_rows, 1);
    assert_eq!(counts.redirects, 1);

    // Full CSV: header plus one row per occurrence
    let all_csv = fs::read_to_string(config.output.path_for(&config.output.all_csv)).unwrap();
    assert_eq!(all_csv.lines().count(), 7);

    // Failures CSV: header plus the single 404
    let broken_csv =
        fs::read_to_string(config.output.path_for(&config.output.broken_csv)).unwrap();
    let broken_lines: Vec<&str> = broken_csv.lines().collect();
    assert_eq!(broken_lines.len(), 2);
    assert!(broken_lines[1].contains("a.xml"));
    assert!(broken_lines[1].ends_with(&format!("{}/missing,Not Found", base_url)));

    // Redirect report: the permanent redirect from document b
    let redirects_csv =
        fs::read_to_string(config.output.path_for(&config.output.redirects_csv)).unwrap();
    let redirect_lines: Vec<&str> = redirects_csv.lines().collect();
    assert_eq!(redirect_lines.len(), 2);
    assert!(redirect_lines[1].starts_with("Week 2,"));
    assert!(redirect_lines[1].ends_with(&format!(
        "Introduction,{}/moved,{}/moved-here",
        base_url, base_url
    )));

    // Failure reports exist for every document, even ones with no failures
    let failures =
        read_reports_json(&config.output.path_for(&config.output.broken_json)).unwrap();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].sections.entry_count(), 1);
    assert!(failures[1].sections.is_empty());

    // Both documents share one chain for the duplicated URL
    let shared = format!("{}/shared", base_url);
    let full = read_reports_json(&config.output.path_for(&config.output.all_json)).unwrap();
    let chains: Vec<_> = full
        .iter()
        .flat_map(|report| report.sections.iter())
        .flat_map(|section| section.links.iter())
        .filter(|entry| entry.url == shared)
        .map(|entry| entry.chain.clone())
        .collect();
    assert_eq!(chains.len(), 2);
    assert_eq!(chains[0], chains[1]);

    let selection = select_for_archival(&aggregation.cache, &ArchivePolicy::clean_links());
    assert_eq!(selection.selected.len(), 4);
    assert!(!selection.selected.contains(&format!("{}/missing", base_url)));
}

#[tokio::test]
async fn test_single_file_target() {
    let mock_server = MockServer::start().await;
    mount_head(&mock_server, "/only", ResponseTemplate::new(200)).await;

    let corpus_dir = TempDir::new().unwrap();
    write_document(
        corpus_dir.path(),
        "single.xml",
        "Week 1",
        &mock_server.uri(),
        &["/only", "/only"],
    );

    let config = create_test_config(corpus_dir.path().join("out"));
    let paths = find_documents(&corpus_dir.path().join("single.xml")).unwrap();
    let corpus = extract_links_from_corpus(&paths, &config.checker.proxy_suffix);
    let aggregation = check_documents(&config, &corpus.documents).await.unwrap();

    assert_eq!(aggregation.cache.resolutions(), 1);
    assert_eq!(aggregation.failure_count(), 0);
    assert_eq!(aggregation.reports[0].sections.entry_count(), 2);
}
