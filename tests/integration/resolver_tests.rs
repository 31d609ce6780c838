//! Resolution of live URLs against mock servers

use crate::create_test_config;
use ouxml_linkcheck::checker::{HttpResolver, Resolver, RESOLUTION_FAILURE_REASON};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver() -> HttpResolver {
    let config = create_test_config(std::env::temp_dir());
    HttpResolver::new(&config.checker, &config.user_agent).unwrap()
}

#[tokio::test]
async fn test_permanent_redirect_chain_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let new_location = format!("{}/new", base_url);

    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", new_location.as_str()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chain = resolver().resolve(&format!("{}/old", base_url)).await;

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.first().status_code, Some(301));
    assert!(chain.first().ok);
    assert_eq!(chain.first().resolved_url, format!("{}/old", base_url));
    assert_eq!(chain.terminal().status_code, Some(200));
    assert_eq!(chain.terminal().resolved_url, format!("{}/new", base_url));
    assert!(chain.is_ok());
}

#[tokio::test]
async fn test_relative_location_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/a/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "../landing"))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let chain = resolver()
        .resolve(&format!("{}/a/start", mock_server.uri()))
        .await;

    assert_eq!(chain.len(), 2);
    assert_eq!(
        chain.terminal().resolved_url,
        format!("{}/landing", mock_server.uri())
    );
}

#[tokio::test]
async fn test_not_found_is_single_failed_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let chain = resolver()
        .resolve(&format!("{}/missing", mock_server.uri()))
        .await;

    assert_eq!(chain.len(), 1);
    assert!(!chain.is_ok());
    assert_eq!(chain.terminal_status(), Some(404));
    assert_eq!(chain.terminal().reason, "Not Found");
}

#[tokio::test]
async fn test_redirect_without_location_is_terminal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&mock_server)
        .await;

    let chain = resolver()
        .resolve(&format!("{}/nowhere", mock_server.uri()))
        .await;

    assert_eq!(chain.len(), 1);
    assert_eq!(chain.terminal_status(), Some(302));
    assert!(chain.is_ok());
}

#[tokio::test]
async fn test_redirect_loop_becomes_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let loop_location = format!("{}/loop", base_url);

    Mock::given(method("HEAD"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", loop_location.as_str()))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(std::env::temp_dir());
    config.checker.max_redirects = 3;
    let resolver = HttpResolver::new(&config.checker, &config.user_agent).unwrap();

    let url = format!("{}/loop", base_url);
    let chain = resolver.resolve(&url).await;

    assert_eq!(chain.len(), 1);
    assert_eq!(chain.terminal_status(), None);
    assert_eq!(chain.terminal().resolved_url, url);
    assert_eq!(chain.terminal().reason, RESOLUTION_FAILURE_REASON);
}

#[tokio::test]
async fn test_redirects_not_followed_when_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(std::env::temp_dir());
    config.checker.follow_redirects = false;
    let resolver = HttpResolver::new(&config.checker, &config.user_agent).unwrap();

    let chain = resolver.resolve(&format!("{}/old", mock_server.uri())).await;

    assert_eq!(chain.len(), 1);
    assert_eq!(chain.terminal_status(), Some(301));
}

#[tokio::test]
async fn test_connection_refused_is_failure_chain() {
    let url = "http://127.0.0.1:1/unreachable";
    let chain = resolver().resolve(url).await;

    assert_eq!(chain.len(), 1);
    assert!(!chain.is_ok());
    assert_eq!(chain.terminal_status(), None);
    assert_eq!(chain.terminal().resolved_url, url);
}

#[tokio::test]
async fn test_unparsable_url_is_failure_chain() {
    let chain = resolver().resolve("not a url").await;

    assert_eq!(chain.len(), 1);
    assert_eq!(chain.terminal_status(), None);
    assert_eq!(chain.terminal().reason, RESOLUTION_FAILURE_REASON);
}
