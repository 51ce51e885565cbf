//! `/events`. Writes require a session.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;

use eventdesk_core::prelude::*;

use crate::http::extract::{CurrentUser, JsonBody, ListQueryParams};
use crate::http::response::{ApiResult, created, done, ok};
use crate::http::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list).post(create))
        .route("/events/:id", get(show).put(update).delete(destroy))
}

async fn list(
    State(state): State<AppState>,
    ListQueryParams(params): ListQueryParams,
) -> ApiResult<Json<ListEnvelope<EventRecord>>> {
    let page = state.events.list(&params).await?;
    Ok(Json(page.into()))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(ok(state.events.get(&id).await?))
}

// The session is checked before the body is read.
async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    JsonBody(payload): JsonBody,
) -> ApiResult<impl IntoResponse> {
    let input = CreateEvent::from_payload(&payload)?;
    Ok(created(state.events.create(input, &actor).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
    JsonBody(payload): JsonBody,
) -> ApiResult<impl IntoResponse> {
    let input = UpdateEvent::from_payload(&payload)?;
    Ok(ok(state.events.update(&id, input, &actor).await?))
}

async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
) -> ApiResult<impl IntoResponse> {
    state.events.delete(&id, &actor).await?;
    Ok(done())
}
