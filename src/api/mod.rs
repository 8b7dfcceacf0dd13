use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{error::AppError, state::State};

pub mod pagination;

pub fn routes() -> Router<State> {
    Router::new()
        .route("/health", get(health))
        .nest("/pagination", pagination::routes())
}

/// Full application router with request tracing and CORS for browser
/// clients.
pub fn app(state: State) -> Router {
    Router::new()
        .nest("/api/v1", routes())
        .fallback(|| async { AppError::not_found() })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "data": "ok",
    }))
}
