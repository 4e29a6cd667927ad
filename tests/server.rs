// End-to-end tests for server mode against a fake issue source.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use rss::Channel;
use tempfile::TempDir;

use issues_rss::cache::CacheStore;
use issues_rss::github::{IssueSource, RepoKey};
use issues_rss::{FeedError, FeedService, Result, server};

const ISSUES: &str = r#"[
    {
        "id": 1, "number": 1, "title": "Sample Entry", "html_url": "https://example.com",
        "body": "Some body", "created_at": "2021-09-08T12:44:47Z", "state": "open",
        "user": {"login": "meain"}, "labels": [{"name": "good-first-issue"}]
    },
    {
        "id": 2, "number": 2, "title": "Another Entry", "html_url": "https://example.com",
        "body": "Another body", "created_at": "2021-09-08T12:44:47Z",
        "closed_at": "2021-10-08T12:44:47Z", "state": "closed",
        "user": {"login": "niaem"}, "labels": []
    }
]"#;

/// Serves ISSUES for meain/dotfiles and fails for everything else.
#[derive(Default)]
struct FixtureSource {
    calls: AtomicUsize,
}

#[async_trait]
impl IssueSource for FixtureSource {
    async fn fetch(&self, repo: &RepoKey) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if repo.to_string() == "meain/dotfiles" {
            Ok(ISSUES.as_bytes().to_vec())
        } else {
            Err(FeedError::AuthOrNotFound {
                repo: repo.to_string(),
                status: StatusCode::NOT_FOUND,
            })
        }
    }
}

struct TestServer {
    base: String,
    feeds: Arc<FeedService<FixtureSource>>,
    _cache: TempDir,
}

impl TestServer {
    async fn start(cache_max_age: Option<Duration>) -> Self {
        let cache = TempDir::new().unwrap();
        let feeds = Arc::new(FeedService::new(
            CacheStore::new(cache.path()),
            FixtureSource::default(),
            cache_max_age,
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server::router(feeds.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            feeds,
            _cache: cache,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(format!("{}{}", self.base, path)).await.unwrap()
    }

    async fn feed(&self, path: &str) -> Channel {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.bytes().await.unwrap();
        Channel::read_from(&body[..]).unwrap()
    }

    fn upstream_calls(&self) -> usize {
        self.feeds.source().calls.load(Ordering::SeqCst)
    }
}

fn titles(channel: &Channel) -> Vec<&str> {
    channel.items().iter().filter_map(|i| i.title()).collect()
}

#[tokio::test]
async fn test_ping() {
    let server = TestServer::start(None).await;
    let response = server.get("/_ping").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "PONG");
}

#[tokio::test]
async fn test_index_page() {
    let server = TestServer::start(None).await;
    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("<html"));
}

#[tokio::test]
async fn test_feed_all_modes() {
    let server = TestServer::start(None).await;

    let response = server.get("/meain/dotfiles").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/rss+xml; charset=utf-8"
    );
    let body = response.text().await.unwrap();
    assert!(body.contains("<pubDate>Fri, 08 Oct 2021 12:44:47 +0000</pubDate>"));

    let channel = Channel::read_from(body.as_bytes()).unwrap();
    assert_eq!(channel.title(), "meain/dotfiles");
    assert_eq!(
        titles(&channel),
        [
            "[issue-open]: Sample Entry",
            "[issue-closed]: Another Entry",
            "[issue-open]: Another Entry",
        ]
    );
    let dates: Vec<_> = channel.items().iter().filter_map(|i| i.pub_date()).collect();
    assert_eq!(
        dates,
        [
            "Wed, 08 Sep 2021 12:44:47 +0000",
            "Fri, 08 Oct 2021 12:44:47 +0000",
            "Wed, 08 Sep 2021 12:44:47 +0000",
        ]
    );
}

#[tokio::test]
async fn test_feed_open_only() {
    let server = TestServer::start(None).await;
    let channel = server.feed("/meain/dotfiles?m=io&m=po").await;
    assert_eq!(
        titles(&channel),
        ["[issue-open]: Sample Entry", "[issue-open]: Another Entry"]
    );
}

#[tokio::test]
async fn test_feed_label_and_user_filters() {
    let server = TestServer::start(None).await;

    let channel = server.feed("/meain/dotfiles?l=good-first-issue").await;
    assert_eq!(titles(&channel), ["[issue-open]: Sample Entry"]);

    let channel = server.feed("/meain/dotfiles?nu=meain&m=ic").await;
    assert_eq!(titles(&channel), ["[issue-closed]: Another Entry"]);

    let channel = server.feed("/meain/dotfiles?u=meain,niaem&nl=good-first-issue").await;
    assert_eq!(
        titles(&channel),
        ["[issue-closed]: Another Entry", "[issue-open]: Another Entry"]
    );
}

#[tokio::test]
async fn test_cached_between_requests() {
    let server = TestServer::start(Some(Duration::from_secs(3600))).await;

    server.feed("/meain/dotfiles").await;
    server.feed("/meain/dotfiles?m=io").await;
    assert_eq!(server.upstream_calls(), 1);
}

#[tokio::test]
async fn test_invalid_path() {
    let server = TestServer::start(None).await;
    for path in ["/meain", "/meain/dotfiles/issues"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.text().await.unwrap(),
            "Invalid request: call `<url>/org/repo`"
        );
    }
}

#[tokio::test]
async fn test_unknown_repo() {
    let server = TestServer::start(None).await;
    let response = server.get("/meain/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Unable to fetch atom feed");
}

#[tokio::test]
async fn test_methods_and_cors() {
    let server = TestServer::start(None).await;
    let client = reqwest::Client::new();
    let url = format!("{}/meain/dotfiles", server.base);

    let response = client.post(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Method is not supported");

    let response = client
        .request(reqwest::Method::OPTIONS, &url)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(server.upstream_calls(), 0);

    let response = client
        .get(&url)
        .header("Origin", "https://reader.example")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_fixed_routes_reject_other_methods() {
    let server = TestServer::start(None).await;
    let client = reqwest::Client::new();

    for path in ["/", "/_ping"] {
        let url = format!("{}{}", server.base, path);

        let response = client.post(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "POST {}", path);
        assert_eq!(response.text().await.unwrap(), "Method is not supported");

        let response = client.delete(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "DELETE {}", path);

        let response = client
            .request(reqwest::Method::OPTIONS, &url)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "OPTIONS {}", path);
    }
}
