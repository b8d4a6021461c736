//! HTTP routes over a shared `Searcher`. The response cache mutex is the
//! only lock; the index itself is read without one.

use super::protocol::{SearchParams, StatusResponse};
use crate::query::{parse_query, SearchMode};
use crate::searcher::Searcher;
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{self, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tower_http::services::ServeDir;

/// Listener and cache settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path other than the API routes
    pub static_dir: Option<PathBuf>,
    /// Cached responses; 0 disables the cache
    pub cache_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            static_dir: None,
            cache_size: 128,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

type CacheKey = (SearchMode, String);

#[derive(Clone)]
struct AppState {
    shared: Arc<Shared>,
}

struct Shared {
    searcher: Arc<Searcher>,
    /// Encoded responses keyed by mode and normalized query
    cache: Option<Mutex<LruCache<CacheKey, Bytes>>>,
    started: Instant,
    queries_served: AtomicU64,
    cache_hits: AtomicU64,
}

impl Shared {
    fn cached(&self, key: &CacheKey) -> Option<Bytes> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(key).cloned()
    }

    fn store(&self, key: CacheKey, body: Bytes) {
        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.put(key, body);
        }
    }
}

/// Build the application routes around a loaded searcher
pub fn router(searcher: Arc<Searcher>, config: &ServerConfig) -> Router {
    let state = AppState {
        shared: Arc::new(Shared {
            searcher,
            cache: NonZeroUsize::new(config.cache_size).map(|n| Mutex::new(LruCache::new(n))),
            started: Instant::now(),
            queries_served: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        }),
    };

    let app = Router::new()
        .route("/search", get(handle_search))
        .route("/status", get(handle_status))
        .with_state(state);

    match &config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

/// Serve until interrupted
pub async fn run_server(searcher: Arc<Searcher>, config: ServerConfig) -> Result<()> {
    let app = router(searcher, &config);
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, static_dir = ?config.static_dir, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn handle_search(
    State(state): State<AppState>,
    extract::Query(params): extract::Query<SearchParams>,
) -> Result<Response, AppError> {
    let raw = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| bad_request("missing search query in URL params"))?;

    let mode = match params.m.as_deref() {
        None | Some("") => SearchMode::default(),
        Some(m) => m.parse::<SearchMode>().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "searching unrecognized mode as a phrase");
            SearchMode::Phrase
        }),
    };

    let shared = Arc::clone(&state.shared);
    shared.queries_served.fetch_add(1, Ordering::Relaxed);

    let query = parse_query(&raw, mode);
    let key = (mode, query.text.clone());
    if let Some(body) = shared.cached(&key) {
        shared.cache_hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(query = %key.1, mode = %mode, "cache hit");
        return Ok(json_response(body));
    }

    // All-words search blocks on its result channel; keep it off the async workers
    let searcher = Arc::clone(&shared.searcher);
    let results = tokio::task::spawn_blocking(move || searcher.search_query(&query))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "search task failed");
            internal_error("search failure")
        })?;

    let body = serde_json::to_vec(&results).map_err(|e| {
        tracing::error!(error = %e, "could not encode search results");
        internal_error("encoding failure")
    })?;
    let body = Bytes::from(body);

    shared.store(key, body.clone());
    Ok(json_response(body))
}

async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let shared = &state.shared;
    let index = shared.searcher.index();
    let served = shared.queries_served.load(Ordering::Relaxed);
    let hits = shared.cache_hits.load(Ordering::Relaxed);

    Json(StatusResponse {
        uptime_secs: shared.started.elapsed().as_secs(),
        paragraphs: index.result_paragraphs().len(),
        works: index.works().len(),
        queries_served: served,
        cache_hit_rate: if served > 0 {
            hits as f32 / served as f32
        } else {
            0.0
        },
    })
}

fn json_response(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Error returned to the client as a plain-text body
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}
