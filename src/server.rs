// HTTP server mode.
// Serves feeds at /org/repo with filters in the query string.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use crate::feed::{FilterConfig, Modes, value_set};
use crate::github::{IssueSource, RepoKey};
use crate::pipeline::FeedService;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Modes and filters taken from a request's query string.
///
/// Keys may repeat (`?m=io&m=po`) and values may be comma separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub modes: Modes,
    pub filters: FilterConfig,
}

impl FeedQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let values = |key: &'static str| {
            pairs
                .iter()
                .filter(move |(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            modes: Modes::from_codes(values("m")),
            filters: FilterConfig {
                labels: value_set(values("l")),
                not_labels: value_set(values("nl")),
                users: value_set(values("u")),
                not_users: value_set(values("nu")),
            },
        }
    }
}

/// Parse `/org/repo` into a repository key.
pub fn repo_from_path(path: &str) -> Option<RepoKey> {
    let mut parts = path.strip_prefix('/')?.split('/');
    let (org, name) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    RepoKey::new(org, name).ok()
}

/// Create the router with all routes.
pub fn router<S: IssueSource + 'static>(feeds: Arc<FeedService<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index).fallback(unsupported_method))
        .route("/_ping", get(ping).fallback(unsupported_method))
        .fallback(feed_handler::<S>)
        .layer(cors)
        .with_state(feeds)
}

/// Start the server and run until it fails.
pub async fn serve<S: IssueSource + 'static>(feeds: FeedService<S>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on http://localhost:{}", port);

    axum::serve(listener, router(Arc::new(feeds))).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn ping() -> &'static str {
    "PONG"
}

/// Non-GET requests: OPTIONS succeeds, everything else is a 404.
async fn unsupported_method(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    (StatusCode::NOT_FOUND, "Method is not supported").into_response()
}

async fn feed_handler<S: IssueSource + 'static>(
    State(feeds): State<Arc<FeedService<S>>>,
    method: Method,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if method != Method::GET {
        return unsupported_method(method).await;
    }

    let Some(repo) = repo_from_path(uri.path()) else {
        return (
            StatusCode::BAD_REQUEST,
            "Invalid request: call `<url>/org/repo`",
        )
            .into_response();
    };

    let query = FeedQuery::from_pairs(&params);
    match feeds.get_rss(&repo, &query.filters, &query.modes).await {
        Ok(rss) => {
            tracing::info!("[OK] {}", repo);
            (
                [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
                rss,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("[ERR] {}: {}", repo, e);
            (StatusCode::NOT_FOUND, "Unable to fetch atom feed").into_response()
        }
    }
}
