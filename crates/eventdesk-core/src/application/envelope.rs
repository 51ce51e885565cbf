//! The uniform response envelope.
//!
//! Every API response is `{"success": bool, "data"?: .., "error"?: ..}`.
//! Lists are flattened: `{"success", "data": [..], "total", "page", "limit",
//! "totalPages"}`.

use serde::{Deserialize, Serialize};

use super::pagination::Page;
use crate::domain::FieldErrors;

/// The `error` member: a plain message, or a flattened field-error map for
/// validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message(String),
    Validation(FieldErrors),
}

impl ErrorBody {
    /// Human-readable text, whichever form the body takes.
    pub fn message(&self) -> String {
        match self {
            Self::Message(m) => m.clone(),
            Self::Validation(errors) => errors.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::Message(message.into())),
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::Validation(errors)),
        }
    }
}

impl Envelope<()> {
    /// `{"success": true}` with no data.
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> From<Page<T>> for ListEnvelope<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            success: true,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages,
            data: page.items,
        }
    }
}
