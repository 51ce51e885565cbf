//! Envelope responses and the error-to-status mapping.
//!
//! | Error category | Status | `error`                 |
//! |----------------|--------|-------------------------|
//! | Validation     | 400    | field-error map or text |
//! | Not found      | 404    | `"Not found"`           |
//! | Unauthorized   | 401    | `"Unauthorized"`        |
//! | anything else  | 500    | `"Internal server error"` |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use eventdesk_core::prelude::*;

pub type ApiResult<T> = Result<T, ApiError>;

/// A failed request. Renders as an envelope with the mapped status.
#[derive(Debug)]
pub struct ApiError(pub DeskError);

impl<E> From<E> for ApiError
where
    E: Into<DeskError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self.0.category() {
            ErrorCategory::Validation => {
                let envelope = match self.0.field_errors() {
                    Some(errors) => Envelope::<()>::invalid(errors.clone()),
                    None => Envelope::<()>::message(self.0.to_string()),
                };
                (StatusCode::BAD_REQUEST, envelope)
            }
            ErrorCategory::NotFound => (StatusCode::NOT_FOUND, Envelope::message("Not found")),
            ErrorCategory::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Envelope::message("Unauthorized"))
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                error!(error = %self.0, retryable = self.0.is_retryable(), "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::message("Internal server error"),
                )
            }
        };
        if status.is_client_error() {
            warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        (status, Json(envelope)).into_response()
    }
}

/// `200 {"success": true, "data": ...}`.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::ok(data))
}

/// `201 {"success": true, "data": ...}`.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope::ok(data)))
}

/// `200 {"success": true}`.
pub fn done() -> Json<Envelope<()>> {
    Json(Envelope::done())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(err: impl Into<DeskError>) -> (StatusCode, Value) {
        let response = ApiError(err.into()).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_carries_field_map() {
        let (status, body) = render(DomainError::field("name", "Required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["fieldErrors"]["name"][0], "Required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = render(DomainError::NotFound {
            entity: "Event",
            id: "e1".into(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "Not found"}));
    }

    #[tokio::test]
    async fn storage_failures_hide_details() {
        let (status, body) =
            render(ApplicationError::repository("event.insert", "disk I/O error")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let (status, _) = render(ApplicationError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
