//! Typed request payloads.
//!
//! Each payload is parsed through its entity schema first, so a request that
//! reaches a service has already passed field validation. Dates stay text
//! here; services coerce them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{DomainError, EntityId, LabelKind, schema::builtin};

/// Distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub tags: Option<Vec<EntityId>>,
}

impl CreateEvent {
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        builtin::event_create_schema().parse(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<EntityId>>,
    /// Replaces the whole association when present; `[]` clears it.
    #[serde(default)]
    pub tags: Option<Vec<EntityId>>,
}

impl UpdateEvent {
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        builtin::event_update_schema().parse(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateLabel {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateLabel {
    pub fn from_payload<K: LabelKind>(payload: &Value) -> Result<Self, DomainError> {
        builtin::create_schema(&K::schema()).parse(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateLabel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateLabel {
    pub fn from_payload<K: LabelKind>(payload: &Value) -> Result<Self, DomainError> {
        builtin::create_schema(&K::schema()).partial().parse(payload)
    }
}

/// Blank optional text is stored as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
