//! Web archive submission against a mock archive

use crate::create_test_config;
use ouxml_linkcheck::archive::{submit_all, ArchiveOutcome, Archiver, WebArchiver};
use ouxml_linkcheck::checker::Throttle;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn archiver_for(mock_server: &MockServer) -> WebArchiver {
    let mut config = create_test_config(std::env::temp_dir());
    config.archive.endpoint = format!("{}/save", mock_server.uri());
    WebArchiver::new(&config.archive, &config.user_agent).unwrap()
}

#[tokio::test]
async fn test_archive_accepts_and_rejects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/save/https%3A//good\.example/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/save/https%3A//blocked\.example/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let archiver = archiver_for(&mock_server).await;
    let urls = vec![
        "https://good.example/page".to_string(),
        "https://blocked.example/page".to_string(),
    ];

    let outcomes = submit_all(&archiver, &urls, &Throttle::disabled()).await;

    assert_eq!(
        outcomes,
        vec![
            ArchiveOutcome {
                url: "https://good.example/page".to_string(),
                archived: true,
            },
            ArchiveOutcome {
                url: "https://blocked.example/page".to_string(),
                archived: false,
            },
        ]
    );
}

#[tokio::test]
async fn test_archive_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/save/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/web/snapshot"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/web/snapshot$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let archiver = archiver_for(&mock_server).await;
    assert!(archiver.submit("https://a.example/").await);
}

#[tokio::test]
async fn test_unreachable_archive_is_not_archived() {
    let mut config = create_test_config(std::env::temp_dir());
    config.archive.endpoint = "http://127.0.0.1:1/save".to_string();
    let archiver = WebArchiver::new(&config.archive, &config.user_agent).unwrap();

    assert!(!archiver.submit("https://a.example/").await);
}
