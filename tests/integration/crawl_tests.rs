//! Integration tests for the crawler
//!
//! These tests use wiremock to serve pages to the real HTTP fetcher and
//! test the full crawl cycle end-to-end. Mock expectations are verified
//! when each server is dropped.

use email_harvest::config::Config;
use email_harvest::crawler::{crawl, Crawler, Fetcher, HttpFetcher};
use email_harvest::output::{CollectingSink, CrawlReport};
use email_harvest::url::Domain;
use email_harvest::FetchError;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Domain of a mock server, e.g. "127.0.0.1:41234"
fn server_domain(server: &MockServer) -> Domain {
    Domain::parse(&server.address().to_string()).expect("Failed to build domain")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

async fn run_crawl(crawler: Crawler) -> (CrawlReport, CollectingSink) {
    let fetcher =
        Arc::new(HttpFetcher::from_config(&Config::default()).expect("Failed to build client"));
    let mut sink = CollectingSink::new();
    let report = crawler.run(fetcher, &mut sink).await;
    (report, sink)
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<html><body>contact: jane.doe@example.com <a href="/about">About</a></body></html>"#),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        html(r#"<html><body>info@example.com <a href="http://external.invalid">Elsewhere</a></body></html>"#),
        1,
    )
    .await;

    let crawler = Crawler::new(server_domain(&mock_server), false);
    let (report, sink) = run_crawl(crawler).await;

    assert_eq!(report.emails, vec!["jane.doe@example.com", "info@example.com"]);
    assert_eq!(sink.emails, report.emails);
    assert!(sink.found);
    assert_eq!(report.stats.pages_visited, 2);
    assert_eq!(report.stats.pages_scanned, 2);
    assert_eq!(report.stats.links_out_of_scope, 1);
}

#[tokio::test]
async fn test_binary_content_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", html(r#"<img><a href="/logo.png">logo</a>"#), 1).await;
    mount_page(
        &mock_server,
        "/logo.png",
        ResponseTemplate::new(200)
            .set_body_raw(b"\x89PNG hidden@example.com".to_vec(), "image/png"),
        1,
    )
    .await;

    let crawler = Crawler::new(server_domain(&mock_server), false);
    let (report, sink) = run_crawl(crawler).await;

    assert!(report.emails.is_empty());
    assert!(!sink.found);
    assert_eq!(report.stats.pages_non_text, 1);
}

#[tokio::test]
async fn test_cyclic_links_fetch_each_page_once() {
    let mock_server = MockServer::start().await;
    let domain = server_domain(&mock_server);

    mount_page(&mock_server, "/", html(r#"<a href="/b">B</a>"#), 1).await;
    mount_page(
        &mock_server,
        "/b",
        html(&format!(
            r#"<a href="http://{}">A</a><a href="/b">B</a><a href="//{}/b">B again</a>"#,
            domain, domain
        )),
        1,
    )
    .await;

    let crawler = Crawler::new(domain, false);
    let (report, _) = run_crawl(crawler).await;

    assert_eq!(report.stats.pages_visited, 2);
    assert_eq!(report.stats.links_queued, 4);
}

#[tokio::test]
async fn test_failed_fetches_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<a href="/missing">gone</a>
               <a href="/error">error</a>
               <a href="/ok">ok</a>"#,
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/error", ResponseTemplate::new(500), 1).await;
    mount_page(&mock_server, "/ok", html("ok@example.com"), 1).await;

    let crawler = Crawler::new(server_domain(&mock_server), false);
    let (report, _) = run_crawl(crawler).await;

    assert_eq!(report.emails, vec!["ok@example.com"]);
    assert_eq!(report.stats.fetch_failures, 2);
    assert_eq!(report.stats.pages_visited, 4);
}

#[tokio::test]
async fn test_redirects_are_followed_by_the_fetcher() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/moved">moved</a> <a href="/ok">ok</a>"#),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/moved",
        ResponseTemplate::new(302).insert_header("location", "/target"),
        1,
    )
    .await;
    mount_page(&mock_server, "/target", html("target@example.com"), 1).await;
    mount_page(&mock_server, "/ok", html("ok@example.com"), 1).await;

    let crawler = Crawler::new(server_domain(&mock_server), false);
    let (report, _) = run_crawl(crawler).await;

    assert_eq!(report.emails, vec!["ok@example.com", "target@example.com"]);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_seed_redirect_is_followed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        ResponseTemplate::new(301).insert_header("location", "/home"),
        1,
    )
    .await;
    mount_page(&mock_server, "/home", html("team@example.com"), 1).await;

    let crawler = Crawler::new(server_domain(&mock_server), false);
    let (report, sink) = run_crawl(crawler).await;

    assert_eq!(report.emails, vec!["team@example.com"]);
    assert!(sink.found);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_redirect_loop_is_a_failed_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(server_domain(&mock_server), false);
    let (report, sink) = run_crawl(crawler).await;

    assert!(report.emails.is_empty());
    assert!(!sink.found);
    assert_eq!(report.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_crawl_entry_point_with_concurrency() {
    let mock_server = MockServer::start().await;

    let mut index = String::new();
    for i in 0..10 {
        index.push_str(&format!(r#"<a href="/team/{i}">member</a>"#));
        mount_page(
            &mock_server,
            &format!("/team/{i}"),
            html(&format!(r#"member{i}@example.com <a href="/">home</a>"#)),
            1,
        )
        .await;
    }
    mount_page(&mock_server, "/", html(&index), 2).await;

    let mut config = Config::default();
    config.crawler.concurrency = 4;

    let mut sink = CollectingSink::new();
    let report = crawl(server_domain(&mock_server), false, &config, &mut sink)
        .await
        .expect("Crawl failed");

    assert_eq!(report.emails.len(), 10);
    assert_eq!(sink.emails.len(), 10);
    assert!(sink.finished);
    // "/" is reached once as the seed and once as "<domain>/"
    assert_eq!(report.stats.pages_visited, 12);
}

#[tokio::test]
async fn test_http_fetcher_reports_status_errors() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/gone", ResponseTemplate::new(404), 1).await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build client");
    let uri = format!("{}/gone", mock_server.address());
    let result = fetcher.fetch(&uri).await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_http_fetcher_returns_content_type_and_body() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/page", html("hello@example.com"), 1).await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build client");
    let uri = format!("{}/page", mock_server.address());
    let page = fetcher.fetch(&uri).await.expect("Fetch failed");

    assert!(page.content_type.starts_with("text/html"));
    assert_eq!(page.body, "hello@example.com");
    assert!(page.is_text());
}

#[tokio::test]
async fn test_http_fetcher_does_not_read_binary_bodies() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/archive.bin",
        ResponseTemplate::new(200)
            .set_body_raw(vec![b'x'; 64 * 1024], "application/octet-stream"),
        1,
    )
    .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build client");
    let uri = format!("{}/archive.bin", mock_server.address());
    let page = fetcher.fetch(&uri).await.expect("Fetch failed");

    assert_eq!(page.content_type, "application/octet-stream");
    assert!(page.body.is_empty());
    assert!(!page.is_text());
}

#[tokio::test]
async fn test_http_fetcher_skips_image_body() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/logo.png",
        ResponseTemplate::new(200)
            .set_body_raw(b"\x89PNG hidden@example.com".to_vec(), "image/png"),
        1,
    )
    .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).expect("Failed to build client");
    let uri = format!("{}/logo.png", mock_server.address());
    let page = fetcher.fetch(&uri).await.expect("Fetch failed");

    assert_eq!(page.body, "");
}
