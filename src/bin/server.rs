use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviedb_search_engine::{
    config, FileCache, MovieEngineError, SearchEngine, SearchPage, TmdbConfig, TmdbProvider,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<SearchEngine>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    cache: CacheStatsDto,
}

#[derive(Debug, Serialize)]
struct CacheStatsDto {
    total_entries: u64,
    oldest_entry: Option<String>,
    newest_entry: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_engine_server=debug,moviedb_search_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let cache_dir = config::cache_dir();

    tracing::info!("Starting MovieDB search proxy");
    tracing::info!("Cache dir: {}", cache_dir);
    tracing::info!("Port: {}", port);

    let tmdb_config = TmdbConfig::from_env()?;
    let provider = Arc::new(TmdbProvider::new(tmdb_config)?);
    let engine =
        SearchEngine::new(provider).with_cache(Arc::new(FileCache::new(&cache_dir)));

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Search proxy listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: moviedb_search_engine::VERSION.to_string(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, AppError> {
    tracing::debug!("Search request: {:?}", params);

    let page = state.engine.search(&params.q, params.page).await?;

    tracing::info!(
        "{:?} -> {} results ({} total)",
        params.q,
        page.results.len(),
        page.total_results
    );

    Ok(Json(page))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let cache_stats = state.engine.cache_stats().await?;

    Ok(Json(StatsResponse {
        cache: CacheStatsDto {
            total_entries: cache_stats.total_entries,
            oldest_entry: cache_stats.oldest_entry.map(|t| t.to_rfc3339()),
            newest_entry: cache_stats.newest_entry.map(|t| t.to_rfc3339()),
        },
    }))
}

// Error handling
struct AppError(MovieEngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            MovieEngineError::QueryTooLong => {
                (StatusCode::BAD_REQUEST, "Query too long.".to_string())
            }
            MovieEngineError::Provider { provider, message } => (
                StatusCode::BAD_GATEWAY,
                format!("Provider '{}' error: {}", provider, message),
            ),
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<MovieEngineError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
