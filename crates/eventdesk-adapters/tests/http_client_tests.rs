//! `ApiService`, `ServiceDirectory` and `RemoteSessionVerifier` against a
//! small in-process HTTP server.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use serde_json::{Value, json};

use eventdesk_adapters::{ApiService, RemoteSessionVerifier, ServiceDirectory};
use eventdesk_core::application::ports::{Filters, FormValues, RelationSource};
use eventdesk_core::domain::schema::RelationMeta;
use eventdesk_core::domain::Cardinality;
use eventdesk_core::prelude::*;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn tags_router() -> Router {
    async fn list(Query(query): Query<Vec<(String, String)>>) -> Json<Value> {
        let limit = query
            .iter()
            .find(|(k, _)| k == "limit")
            .map_or("10".to_string(), |(_, v)| v.clone());
        Json(json!({
            "success": true,
            "data": [
                {"id": "t1", "name": "rust"},
                {"id": "t2"},
                {"name": "orphan"}
            ],
            "total": 3,
            "page": 1,
            "limit": limit.parse::<u32>().unwrap(),
            "totalPages": 1
        }))
    }

    async fn item(Path(id): Path<String>) -> axum::response::Response {
        if id == "t1" {
            Json(json!({"success": true, "data": {"id": "t1", "name": "rust"}})).into_response()
        } else {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"success": false, "error": "Tag not found"})),
            )
                .into_response()
        }
    }

    async fn create(headers: HeaderMap, Json(body): Json<Value>) -> axum::response::Response {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer t0k3n") {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "error": "Unauthorized"})),
            )
                .into_response();
        }
        if body.get("name").and_then(Value::as_str).unwrap_or("").is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": {"formErrors": [], "fieldErrors": {"name": ["Name is required"]}}
                })),
            )
                .into_response();
        }
        let mut created = body.clone();
        created["id"] = json!("t9");
        (
            StatusCode::CREATED,
            Json(json!({"success": true, "data": created})),
        )
            .into_response()
    }

    async fn remove(Path(_id): Path<String>) -> Json<Value> {
        Json(json!({"success": true}))
    }

    Router::new()
        .route("/tags", get(list).post(create))
        .route("/tags/:id", get(item).delete(remove))
}

fn payload(name: &str) -> FormValues {
    let mut values = FormValues::new();
    values.insert("name".into(), json!(name));
    values
}

#[tokio::test]
async fn fetch_items_reads_list_envelope() {
    let base = serve(tags_router()).await;
    let tags: ApiService<Value> = ApiService::new(&base, "/tags");
    let page = tags
        .fetch_items(&Filters::new().set("limit", 25u32))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.meta.page_size, 25);
    assert_eq!(page.meta.total_pages, 1);
}

#[tokio::test]
async fn missing_item_carries_status_and_message() {
    let base = serve(tags_router()).await;
    let tags: ApiService<Value> = ApiService::new(&base, "/tags");
    assert_eq!(tags.fetch_item("t1").await.unwrap()["name"], "rust");

    let err = tags.fetch_item("nope").await.unwrap_err();
    assert_eq!(
        err,
        DeskError::Application(ApplicationError::Remote {
            status: 404,
            message: "Tag not found".into()
        })
    );
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

#[tokio::test]
async fn create_sends_bearer_token() {
    let base = serve(tags_router()).await;

    let anonymous: ApiService<Value> = ApiService::new(&base, "/tags");
    let err = anonymous.create_item(&payload("web")).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unauthorized);

    let signed_in: ApiService<Value> = ApiService::new(&base, "/tags").with_token("t0k3n");
    let created = signed_in.create_item(&payload("web")).await.unwrap();
    assert_eq!(created["id"], "t9");
    assert_eq!(created["name"], "web");
}

#[tokio::test]
async fn field_errors_come_back_as_validation() {
    let base = serve(tags_router()).await;
    let tags: ApiService<Value> = ApiService::new(&base, "/tags").with_token("t0k3n");
    let err = tags.create_item(&payload("")).await.unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.for_field("name").unwrap()[0], "Name is required");
}

#[derive(Debug, serde::Deserialize)]
struct TagItem {
    id: String,
    name: String,
}

#[tokio::test]
async fn typed_items_decode_without_default() {
    let base = serve(tags_router()).await;
    let tags: ApiService<TagItem> = ApiService::new(&base, "/tags").with_token("t0k3n");

    let found = tags.fetch_item("t1").await.unwrap();
    assert_eq!((found.id.as_str(), found.name.as_str()), ("t1", "rust"));

    let created = tags.create_item(&payload("web")).await.unwrap();
    assert_eq!(created.id, "t9");

    let err = tags.create_item(&payload("")).await.unwrap_err();
    let DeskError::Domain(DomainError::Validation(errors)) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(errors.for_field("name").unwrap(), ["Name is required"]);
}

#[tokio::test]
async fn delete_accepts_bare_success() {
    let base = serve(tags_router()).await;
    let tags: ApiService<Value> = ApiService::new(&base, "/tags");
    tags.delete_item("t1").await.unwrap();
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let tags: ApiService<Value> = ApiService::new("http://127.0.0.1:1", "/tags");
    let err = tags.fetch_items(&Filters::new()).await.unwrap_err();
    assert!(matches!(
        err,
        DeskError::Application(ApplicationError::Transport { .. })
    ));
}

#[tokio::test]
async fn relation_options_use_display_field() {
    let base = serve(tags_router()).await;
    let registry = Arc::new(builtin_registry().unwrap());
    let directory = ServiceDirectory::new(&base, registry);

    let relation = RelationMeta {
        target: "tags".into(),
        display_field: "name".into(),
        cardinality: Cardinality::Multiple,
    };
    let options = directory.options(&relation).await.unwrap();
    let pairs: Vec<_> = options
        .iter()
        .map(|o| (o.value.as_str(), o.label.as_str()))
        .collect();
    assert_eq!(pairs, vec![("t1", "rust"), ("t2", "t2")]);

    let unknown = RelationMeta {
        target: "venues".into(),
        ..relation
    };
    assert_eq!(
        directory.options(&unknown).await.unwrap_err().category(),
        ErrorCategory::NotFound
    );
}

fn auth_router() -> Router {
    async fn session(headers: HeaderMap) -> axum::response::Response {
        let cookie = headers.get("cookie").and_then(|v| v.to_str().ok());
        let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
        match (cookie, bearer) {
            (Some("better-auth.session_token=abc"), _) | (_, Some("Bearer abc")) => Json(json!({
                "session": {"id": "s1", "userId": "u1"},
                "user": {
                    "id": "u1",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "emailVerified": true,
                    "role": "admin"
                }
            }))
            .into_response(),
            (_, Some("Bearer broken")) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            _ => Json(Value::Null).into_response(),
        }
    }
    Router::new().route("/api/auth/get-session", get(session))
}

#[tokio::test]
async fn remote_session_forwards_cookie_and_bearer() {
    let base = serve(auth_router()).await;
    let verifier = RemoteSessionVerifier::new(&base);

    let by_cookie = Credentials {
        bearer: None,
        cookie: Some("better-auth.session_token=abc".into()),
    };
    let user = verifier.verify(&by_cookie).await.unwrap().unwrap();
    assert_eq!(user.id.as_str(), "u1");
    assert!(user.email_verified);

    let by_bearer = Credentials {
        bearer: Some("abc".into()),
        cookie: None,
    };
    assert!(verifier.verify(&by_bearer).await.unwrap().is_some());

    let stranger = Credentials {
        bearer: Some("zzz".into()),
        cookie: None,
    };
    assert_eq!(verifier.verify(&stranger).await.unwrap(), None);
    assert_eq!(verifier.verify(&Credentials::default()).await.unwrap(), None);
}

#[tokio::test]
async fn remote_session_failure_is_an_error() {
    let base = serve(auth_router()).await;
    let verifier = RemoteSessionVerifier::new(&base);
    let broken = Credentials {
        bearer: Some("broken".into()),
        cookie: None,
    };
    let err = verifier.verify(&broken).await.unwrap_err();
    assert!(matches!(
        err,
        DeskError::Application(ApplicationError::SessionLookup { .. })
    ));
}
