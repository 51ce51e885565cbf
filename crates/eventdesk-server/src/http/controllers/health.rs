use axum::Json;
use axum::Router;
use axum::routing::get;
use serde_json::{Value, json};

use crate::http::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
