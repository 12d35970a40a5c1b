//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_intel::config::{Config, CrawlerConfig};
use site_intel::crawl_website;
use site_intel::storage::{SiteModelStore, SqliteStore};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given limits
fn create_test_config(max_pages: u32, max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            max_depth,
            concurrency: 4,
            request_timeout_secs: 5,
        },
        ..Config::default()
    }
}

fn html(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{}</title></head><body><main>{}</main></body></html>"#,
        title, body
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_three_page_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            "Home",
            r#"<a href="/about">About</a> <a href="/contact">Contact</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/about", html("About", "Our company history")).await;
    mount_page(&mock_server, "/contact", html("Contact", "Call our team")).await;

    let config = create_test_config(10, 2);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(model.total_pages, 3);
    assert_eq!(model.domain, "127.0.0.1");
    assert_eq!(model.crawl_depth, 2);

    let root_children = model
        .page_hierarchy
        .get("/")
        .expect("root segment missing from hierarchy");
    assert!(root_children.contains(&format!("{}/about", base_url)));
    assert!(root_children.contains(&format!("{}/contact", base_url)));

    let home = model.page(&format!("{}/", base_url)).expect("home page missing");
    assert_eq!(home.depth, 0);
    assert_eq!(home.title, "Home");
    assert_eq!(
        model.page(&format!("{}/about", base_url)).map(|p| p.depth),
        Some(1)
    );
}

#[tokio::test]
async fn test_unreachable_root_yields_empty_model() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);

    let config = create_test_config(10, 2);
    let seed = format!("http://127.0.0.1:{}", port);
    let model = crawl_website(&config, &seed, CancellationToken::new())
        .await
        .expect("unreachable root must not be an error");

    assert_eq!(model.total_pages, 0);
    assert!(model.pages.is_empty());
    assert!(model.page_hierarchy.is_empty());
    assert!(model.intent_map.is_empty());
    assert!(model.conversion_funnels.is_empty());
    assert_eq!(model.roi_metrics.total_pages_analyzed, 0);
}

#[tokio::test]
async fn test_page_cap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{}">Page {}</a> "#, i, i))
        .collect();
    mount_page(&mock_server, "/", html("Home", &links)).await;
    for i in 0..10 {
        mount_page(&mock_server, &format!("/p{}", i), html("Leaf", "leaf page")).await;
    }

    let config = create_test_config(3, 2);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(model.total_pages, 3);
    assert!(model.page(&format!("{}/", base_url)).is_some());
}

#[tokio::test]
async fn test_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html("Home", r#"<a href="/a">A</a>"#)).await;
    mount_page(&mock_server, "/a", html("A", r#"<a href="/b">B</a>"#)).await;

    // Beyond max depth: must never be requested
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html("B", "too deep")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 1);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(model.total_pages, 2);
    assert!(model.pages.iter().all(|p| p.depth <= 1));
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            "Home",
            r#"<a href="/a">A</a> <a href="/a/">A again</a> <a href="/a#top">A top</a>
               <a href="/a?utm_source=mail">A tracked</a>"#,
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(html("A", r#"<a href="/">Home</a>"#)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 3);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(model.total_pages, 2);
    let mut urls: Vec<_> = model.pages.iter().map(|p| p.url.clone()).collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 2);
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            "Home",
            r#"<a href="/missing">Gone</a> <a href="/broken">Broken</a> <a href="/ok">Ok</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/ok", html("Ok", "fine")).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(10, 2);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(model.total_pages, 2);
    assert!(model.page(&format!("{}/missing", base_url)).is_none());
    assert!(model.page(&format!("{}/broken", base_url)).is_none());
    assert!(model.page(&format!("{}/ok", base_url)).is_some());
}

#[tokio::test]
async fn test_external_links_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            "Home",
            &format!(r#"<a href="{}/elsewhere">Elsewhere</a>"#, other_server.uri()),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html("Other", "other")))
        .expect(0)
        .mount(&other_server)
        .await;

    let config = create_test_config(10, 2);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(model.total_pages, 1);
    assert_eq!(model.pages[0].external_links.len(), 1);
}

#[tokio::test]
async fn test_redirected_page_links_resolve_against_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/docs/start"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/docs/start",
        html("Start", r#"<a href="install">Install</a>"#),
    )
    .await;
    mount_page(&mock_server, "/docs/install", html("Install", "steps")).await;

    let config = create_test_config(10, 2);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    // The root record keeps the requested URL
    let root = model.page(&format!("{}/", base_url)).expect("root missing");
    assert_eq!(root.title, "Start");
    assert!(model.page(&format!("{}/docs/install", base_url)).is_some());
}

#[tokio::test]
async fn test_offsite_redirect_does_not_leave_site() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html("Home", r#"<a href="/out">Out</a>"#)).await;
    Mock::given(method("GET"))
        .and(path("/out"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/landing", other_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    mount_page(
        &other_server,
        "/landing",
        html("Landing", r#"<a href="/secret">Secret</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html("Secret", "hidden")))
        .expect(0)
        .mount(&other_server)
        .await;

    let config = create_test_config(10, 3);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert!(model.pages.iter().all(|p| p.url.starts_with(&base_url)));
    assert!(model
        .page(&format!("{}/secret", other_server.uri()))
        .is_none());

    let out = model.page(&format!("{}/out", base_url)).expect("redirected page missing");
    assert!(out.internal_links.is_empty());
    assert_eq!(out.external_links, vec![format!("{}/secret", other_server.uri())]);
}

#[tokio::test]
async fn test_cancellation_keeps_finished_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html("Home", r#"<a href="/slow">Slow</a>"#)).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html("Slow", "slow"))
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let config = create_test_config(10, 2);
    let model = tokio::time::timeout(
        Duration::from_secs(3),
        crawl_website(&config, &base_url, cancel),
    )
    .await
    .expect("cancelled crawl did not return promptly")
    .expect("Crawl failed");

    assert_eq!(model.total_pages, 1);
    assert!(model.page(&format!("{}/", base_url)).is_some());
    assert!(model.page(&format!("{}/slow", base_url)).is_none());
}

#[tokio::test]
async fn test_cancellation_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html("Slow", "slow"))
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let config = create_test_config(10, 2);
    let model = tokio::time::timeout(
        Duration::from_secs(2),
        crawl_website(&config, &base_url, cancel),
    )
    .await
    .expect("cancelled crawl did not return promptly")
    .expect("Crawl failed");

    assert_eq!(model.total_pages, 0);
}

#[tokio::test]
async fn test_crawled_model_survives_storage() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html("Home", r#"<a href="/pricing">Pricing</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/pricing",
        html("Pricing", "Compare product price and cost"),
    )
    .await;

    let config = create_test_config(10, 2);
    let model = crawl_website(&config, &base_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("sites.db");

    {
        let mut store = SqliteStore::new(&db_path).expect("Failed to open DB");
        store.store("local", &model).expect("Failed to store model");
    }

    let store = SqliteStore::new(&db_path).expect("Failed to reopen DB");
    let loaded = store
        .load("local")
        .expect("Failed to load model")
        .expect("model missing");
    assert_eq!(loaded.domain, model.domain);
    assert_eq!(loaded.total_pages, 2);
    assert_eq!(loaded.page_hierarchy, model.page_hierarchy);
    assert_eq!(loaded.intent_map, model.intent_map);
    let urls: Vec<_> = loaded.pages.iter().map(|p| p.url.as_str()).collect();
    let expected: Vec<_> = model.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, expected);

    let sites = store.list_sites().expect("Failed to list sites");
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].total_pages, 2);
}
