//! Request extractors whose rejections are envelopes.

use axum::Json;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use serde_json::Value;
use tracing::debug;

use eventdesk_core::prelude::*;

use super::response::ApiError;
use super::state::AppState;

/// A JSON request body. Malformed JSON is a 400 with a form-level error.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(DomainError::Validation(FieldErrors::form(
                rejection.body_text(),
            ))
            .into()),
        }
    }
}

/// `page`, `limit`, `skip`, `search`, `sortBy`, `sortOrder` from the query
/// string, still unresolved.
#[derive(Debug)]
pub struct ListQueryParams(pub RawListParams);

#[async_trait]
impl<S> FromRequestParts<S> for ListQueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<RawListParams>::from_request_parts(parts, state).await {
            Ok(Query(params)) => Ok(Self(params)),
            Err(rejection) => Err(DomainError::Validation(FieldErrors::form(
                rejection.body_text(),
            ))
            .into()),
        }
    }
}

/// The verified user behind the request. Rejects with 401 when the
/// request carries no live session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// Bearer token and raw cookie header of a request.
pub fn credentials(parts: &Parts) -> Credentials {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let cookie = parts
        .headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Credentials { bearer, cookie }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = credentials(parts);
        match state.sessions.verify(&credentials).await? {
            Some(user) => {
                debug!(user_id = %user.id, "Session verified");
                Ok(Self(user))
            }
            None => Err(ApplicationError::Unauthorized.into()),
        }
    }
}
