use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;

use eventdesk_core::prelude::*;

use crate::http::extract::ListQueryParams;
use crate::http::response::{ApiResult, ok};
use crate::http::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/:id", get(show))
}

async fn list(
    State(state): State<AppState>,
    ListQueryParams(params): ListQueryParams,
) -> ApiResult<Json<ListEnvelope<User>>> {
    Ok(Json(state.users.list(&params).await?.into()))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(ok(state.users.get(&id).await?))
}
