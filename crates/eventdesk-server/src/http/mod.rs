//! The REST API.
//!
//! Every response body is an envelope (`eventdesk_core::application::Envelope`),
//! including rejections and unknown routes.

pub mod controllers;
pub mod extract;
pub mod response;
pub mod state;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tower_http::trace::TraceLayer;

use eventdesk_core::prelude::*;

pub use state::AppState;

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    let tags = state.tags.clone();
    let categories = state.categories.clone();

    Router::new()
        .merge(controllers::events::routes())
        .merge(controllers::labels::routes(tags))
        .merge(controllers::labels::routes(categories))
        .merge(controllers::users::routes())
        .merge(controllers::admin::routes())
        .merge(controllers::health::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(Envelope::<()>::message("Not found")))
}
