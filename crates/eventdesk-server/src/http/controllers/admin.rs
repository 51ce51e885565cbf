//! Admin descriptors: the registry, navigation and per-entity form plans.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::{Deserialize, Serialize};

use eventdesk_core::prelude::*;

use crate::http::response::{ApiResult, ok};
use crate::http::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/entities", get(list))
        .route("/admin/entities/:key", get(show))
        .route("/admin/entities/:key/form", get(form))
        .route("/admin/menu", get(menu))
}

/// Compact listing row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntitySummary {
    key: String,
    title: String,
    href: String,
    endpoint: String,
    icon: Option<String>,
    order: u32,
}

async fn list(State(state): State<AppState>) -> impl IntoResponse {
    let entries: Vec<EntitySummary> = state
        .registry
        .entries()
        .into_iter()
        .map(|e| EntitySummary {
            key: e.key.clone(),
            title: e.config.title.clone(),
            href: e.href.clone(),
            endpoint: e.config.endpoint.clone(),
            icon: e.effective_icon().map(str::to_string),
            order: e.effective_order(),
        })
        .collect();
    ok(entries)
}

async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(ok(state.registry.get(&key)?.clone()))
}

async fn menu(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.registry.menu())
}

#[derive(Debug, Default, Deserialize)]
struct FormQuery {
    #[serde(default)]
    mode: FormMode,
}

/// The planned create/edit form for one entity, without initial values.
async fn form(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<FormQuery>,
) -> ApiResult<impl IntoResponse> {
    let entity = state.registry.get(&key)?;
    Ok(ok(FormPlan::build(&entity.config, query.mode, None)))
}
