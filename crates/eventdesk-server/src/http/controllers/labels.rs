//! `/tags` and `/categories`. One set of handlers, instantiated per kind.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;

use eventdesk_core::application::services::LabelService;
use eventdesk_core::prelude::*;

use crate::http::extract::{JsonBody, ListQueryParams};
use crate::http::response::{ApiResult, created, done, ok};

/// Routes for the `K` collection, mounted at `/{K::KEY}`.
pub fn routes<K, S>(service: Arc<LabelService<K>>) -> Router<S>
where
    K: LabelKind,
    S: Clone + Send + Sync + 'static,
{
    let collection = format!("/{}", K::KEY);
    let item = format!("/{}/:id", K::KEY);
    Router::new()
        .route(&collection, get(list::<K>).post(create::<K>))
        .route(&item, get(show::<K>).put(update::<K>).delete(destroy::<K>))
        .with_state(service)
}

type Service<K> = State<Arc<LabelService<K>>>;

async fn list<K: LabelKind>(
    State(service): Service<K>,
    ListQueryParams(params): ListQueryParams,
) -> ApiResult<Json<ListEnvelope<Label<K>>>> {
    Ok(Json(service.list(&params).await?.into()))
}

async fn show<K: LabelKind>(
    State(service): Service<K>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(ok(service.get(&id).await?))
}

async fn create<K: LabelKind>(
    State(service): Service<K>,
    JsonBody(payload): JsonBody,
) -> ApiResult<impl IntoResponse> {
    let input = CreateLabel::from_payload::<K>(&payload)?;
    Ok(created(service.create(input).await?))
}

async fn update<K: LabelKind>(
    State(service): Service<K>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody,
) -> ApiResult<impl IntoResponse> {
    let input = UpdateLabel::from_payload::<K>(&payload)?;
    Ok(ok(service.update(&id, input).await?))
}

async fn destroy<K: LabelKind>(
    State(service): Service<K>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    service.delete(&id).await?;
    Ok(done())
}
