//! etude-api library — personal music-practice backend
//!
//! Stores the song catalog, the user's ordered favorites, a bounded
//! search history, per-measure difficulty overrides and the proficiency
//! gauge, and serves them over a thin HTTP API. Audio scoring and
//! listening history live in external services.

use axum::http::Method;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use etude_common::config::ServiceConfig;

pub mod api;
pub mod db;
pub mod error;
pub mod recommend;
pub mod services;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service endpoints configuration
    pub config: ServiceConfig,
    /// Shared HTTP client for the external scoring/listening services
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: ServiceConfig) -> Self {
        Self {
            db,
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    // Permissive CORS for the single-user dev deployment
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/search", post(api::catalog::search))
        .route("/select", post(api::catalog::select))
        .route(
            "/favorites",
            post(api::favorites::add)
                .get(api::favorites::list)
                .put(api::favorites::set_all),
        )
        .route("/history/searches", get(api::history::recent_searches))
        .route(
            "/music/:music_id/difficulty-settings",
            put(api::overrides::set_for_song).get(api::overrides::get_for_song),
        )
        .route(
            "/proficiency",
            get(api::proficiency::get).put(api::proficiency::set),
        )
        .route("/proficiency/calculate", post(api::proficiency::calculate))
        .route(
            "/recommendations/proficiency",
            get(api::recommend::by_proficiency),
        )
        .route(
            "/recommendations/recent",
            post(api::recommend::from_recently_played),
        )
        .merge(api::health::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
