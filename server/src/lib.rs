pub mod config;

use axum::{extract::{Path, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use config::ServerConfig;
use movie_core::{find_by_id, load_all_or_empty, ListItemView, MovieRecord, SnapshotPaths};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<SnapshotPaths>,
}

pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState { snapshot: Arc::new(config.snapshot.clone()) };

    let mut app = Router::new()
        .route("/api/ping", get(ping_handler))
        .route("/api/ping/", get(ping_handler))
        .route("/api/movies", get(list_handler))
        .route("/api/movies/", get(list_handler))
        .route("/api/movies/:id", get(detail_handler))
        .route("/api/movies/:id/", get(detail_handler))
        .with_state(app_state);

    // Anything that isn't an API route or a bundle file gets index.html so the
    // client can do its own routing.
    if config.serves_static() {
        let index = config.build_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(&config.build_dir).fallback(ServeFile::new(index)));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_allow_origin.as_deref()))
}

// CORS_ALLOW_ORIGIN is a comma-separated list; allow Any when unset or unparsable
fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_origin
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn ping_handler() -> &'static str {
    tracing::info!("received GET request to /api/ping");
    "pong!"
}

pub async fn list_handler(State(state): State<AppState>) -> Json<Vec<ListItemView>> {
    tracing::info!("received GET request to /api/movies");
    let movies = load_all_or_empty(&state.snapshot);
    Json(movies.iter().map(ListItemView::from).collect())
}

pub async fn detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieRecord>, (StatusCode, Json<ErrorBody>)> {
    tracing::info!("received GET request to /api/movies/{id}");
    let movies = load_all_or_empty(&state.snapshot);
    match find_by_id(&movies, &id) {
        Some(movie) => Ok(Json(movie.clone())),
        None => {
            tracing::debug!(%id, "no movie with that id");
            Err((StatusCode::NOT_FOUND, Json(ErrorBody { message: NOT_FOUND_MESSAGE.into() })))
        }
    }
}
