//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small wiki and run the full
//! crawl cycle end-to-end against it.

use std::path::Path;
use tempfile::TempDir;
use wiki_backlinks::config::{Config, PageErrorPolicy, SeedSpec};
use wiki_backlinks::crawler::{Coordinator, HttpPageFetcher};
use wiki_backlinks::output::{ChannelProgress, PageResult};
use wiki_backlinks::storage::FsArtifactStore;
use wiki_backlinks::{RunState, ScrapeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, policy: PageErrorPolicy) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.crawler.max_concurrent_pages = 1;
    config.crawler.request_timeout_secs = 5;
    config.crawler.on_page_error = policy;
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=UTF-8")
}

fn index_page(articles: &[&str]) -> String {
    let items: String = articles
        .iter()
        .map(|a| format!(r#"<li><a href="/wiki/{a}" title="{a}">{a}</a></li>"#))
        .collect();
    format!(
        r#"<html><body>
        <h1 id="firstHeading">Pages that link to "Dog"</h1>
        <ul id="mw-whatlinkshere-list">{items}</ul>
        <div id="footer"><a href="/wiki/Main_Page">Main Page</a></div>
        </body></html>"#
    )
}

/// Article with 3 unique article links and 5 unique non-stop words
fn article_alpha() -> String {
    r#"<html><body>
    <h1 id="firstHeading">Alpha</h1>
    <div id="mw-content-text"><p>The <a href="/wiki/Wolf">wolf</a> and the
    <a href="/wiki/Deer">deer</a> in the <a href="/wiki/Forest">forest</a> howl.
    <a href="/wiki/Wolf">Wolf</a>!<a href="/wiki/Category:Animals"> </a><a class="mw-disambig" href="/wiki/Pack"> </a></p></div>
    </body></html>"#
        .to_string()
}

async fn mount_index(server: &MockServer, articles: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .and(query_param("title", "Special:WhatLinksHere/Dog"))
        .and(query_param("limit", "10"))
        .and(query_param("hideredirs", "1"))
        .and(query_param("hidetrans", "1"))
        .respond_with(html(index_page(articles)))
        .expect(1)
        .mount(server)
        .await;
}

fn coordinator(
    config: Config,
    output: &Path,
) -> Coordinator<HttpPageFetcher, FsArtifactStore> {
    let fetcher = HttpPageFetcher::new(&config.user_agent, &config.crawler)
        .expect("Failed to build fetcher");
    let store = FsArtifactStore::new(output);
    let seed = SeedSpec::new("Dog", "en", 10, output);

    Coordinator::new(seed, config, fetcher, store).expect("Failed to create coordinator")
}

fn drain(receiver: &mut tokio::sync::mpsc::UnboundedReceiver<PageResult>) -> Vec<PageResult> {
    let mut results = Vec::new();
    while let Ok(result) = receiver.try_recv() {
        results.push(result);
    }
    results
}

#[tokio::test]
async fn test_crawl_skips_unreachable_article() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, &["A", "B"]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .respond_with(html(article_alpha()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/B"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let (sink, mut receiver) = ChannelProgress::new();
    let coordinator = coordinator(
        create_test_config(&mock_server.uri(), PageErrorPolicy::Skip),
        output.path(),
    )
    .with_progress(sink);

    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.state, RunState::Done);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].handle.as_str(), "/wiki/B");

    let links = std::fs::read_to_string(output.path().join("Links/Dog/A")).unwrap();
    assert_eq!(links, "/wiki/Wolf\n/wiki/Deer\n/wiki/Forest\n");
    assert_eq!(links.lines().count(), 3);

    let words = std::fs::read_to_string(output.path().join("Words/Dog/A")).unwrap();
    assert_eq!(words, "alpha wolf deer forest howl");

    assert!(!output.path().join("Links/Dog/B").exists());
    assert!(!output.path().join("Words/Dog/B").exists());

    let results = drain(&mut receiver);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].article.as_str(), "A");
    assert_eq!(results[0].link_count, 3);
    assert_eq!(results[0].word_count, 5);
}

#[tokio::test]
async fn test_seed_unreachable_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No article may be requested
    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .respond_with(html(article_alpha()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let coordinator = coordinator(
        create_test_config(&mock_server.uri(), PageErrorPolicy::Skip),
        output.path(),
    );

    let result = coordinator.run().await;

    assert!(matches!(result, Err(ScrapeError::SeedUnreachable { .. })));
    assert!(!output.path().join("Links").exists());
    assert!(!output.path().join("Words").exists());
}

#[tokio::test]
async fn test_index_without_candidates_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, &["Category:Dogs", "Talk:Dog"]).await;

    let output = TempDir::new().unwrap();
    let coordinator = coordinator(
        create_test_config(&mock_server.uri(), PageErrorPolicy::Skip),
        output.path(),
    );

    let result = coordinator.run().await;

    match result {
        Err(ScrapeError::NoCandidatesFound { url }) => {
            assert!(url.contains("WhatLinksHere"));
        }
        other => panic!("expected NoCandidatesFound, got {:?}", other.map(|s| s.processed)),
    }
    assert!(!output.path().join("Links").exists());
}

#[tokio::test]
async fn test_abort_policy_stops_at_first_failure() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, &["B", "A"]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/B"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .respond_with(html(article_alpha()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let coordinator = coordinator(
        create_test_config(&mock_server.uri(), PageErrorPolicy::Abort),
        output.path(),
    );

    let result = coordinator.run().await;

    assert!(matches!(result, Err(ScrapeError::PageUnreachable { .. })));
    assert!(!output.path().join("Links/Dog/A").exists());
}

#[tokio::test]
async fn test_rerun_overwrites_artifacts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .respond_with(html(index_page(&["A"])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .respond_with(html(article_alpha()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), PageErrorPolicy::Skip);

    let first = coordinator(config.clone(), output.path()).run().await.unwrap();
    let words_first = std::fs::read_to_string(output.path().join("Words/Dog/A")).unwrap();

    let second = coordinator(config, output.path()).run().await.unwrap();
    let words_second = std::fs::read_to_string(output.path().join("Words/Dog/A")).unwrap();

    assert_eq!(first.processed, 1);
    assert_eq!(second.processed, 1);
    assert_eq!(words_first, words_second);
}

#[tokio::test]
async fn test_concurrent_crawl_reports_every_article_once() {
    let mock_server = MockServer::start().await;
    let articles = ["A", "B", "C", "D", "E", "F"];

    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .respond_with(html(index_page(&articles)))
        .mount(&mock_server)
        .await;

    for name in articles {
        Mock::given(method("GET"))
            .and(path(format!("/wiki/{}", name)))
            .respond_with(html(format!(
                r#"<html><body><h1 id="firstHeading">{name}</h1><div id="mw-content-text"><a href="/wiki/Dog">dog</a> page {name}</div></body></html>"#
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), PageErrorPolicy::Skip);
    config.crawler.max_concurrent_pages = 4;

    let (sink, mut receiver) = ChannelProgress::new();
    let summary = coordinator(config, output.path())
        .with_progress(sink)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.processed, articles.len());

    let reported: Vec<String> = drain(&mut receiver)
        .into_iter()
        .map(|r| r.article.to_string())
        .collect();
    assert_eq!(reported, articles);

    for name in articles {
        let links = std::fs::read_to_string(output.path().join("Links/Dog").join(name)).unwrap();
        assert_eq!(links, "/wiki/Dog\n");
    }
}

#[tokio::test]
async fn test_blocked_words_folder_leaves_no_links() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, &["A"]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .respond_with(html(article_alpha()))
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    // A plain file where the Words folder should be
    std::fs::write(output.path().join("Words"), "not a folder").unwrap();

    let summary = coordinator(
        create_test_config(&mock_server.uri(), PageErrorPolicy::Skip),
        output.path(),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failures.len(), 1);
    assert!(!output.path().join("Links/Dog/A").exists());
}

#[tokio::test]
async fn test_seed_with_path_separator_fails_before_fetching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(index_page(&["A", "B"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), PageErrorPolicy::Skip);
    let fetcher = HttpPageFetcher::new(&config.user_agent, &config.crawler).unwrap();
    let seed = SeedSpec::new("AC/DC", "en", 10, output.path());

    let result = Coordinator::new(seed, config, fetcher, FsArtifactStore::new(output.path()));

    assert!(matches!(result, Err(ScrapeError::Config(_))));
    assert!(!output.path().join("Links").exists());
}
