//! The REST API as seen from a client.
//!
//! `CrudService<T>` is the uniform CRUD surface every admin screen talks to.
//! Every method is a single request: no retry, no backoff, no idempotency
//! key. A failed write must be redone by the caller, and may already have
//! been applied by the server.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::schema::RelationMeta;
use crate::error::DeskResult;

/// A flat key/value payload, as produced by the form planner.
pub type FormValues = serde_json::Map<String, Value>;

// ── Filters ──────────────────────────────────────────────────────────────────

/// A query-string value. Only text and numbers can be sent; anything else
/// is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Unset,
}

impl FilterValue {
    fn render(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            // Below 2^53 every whole f64 is exact and fits an i64.
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Some(format!("{}", *n as i64))
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Unset => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Into::into)
    }
}

/// Query filters in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(Vec<(String, FilterValue)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an earlier value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Pairs to send, unset values dropped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.render().map(|v| (k.clone(), v)))
            .collect()
    }
}

// ── Pages ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPage<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

// ── Ports ────────────────────────────────────────────────────────────────────

/// Uniform CRUD client for one REST collection.
///
/// Implemented by:
/// - `eventdesk_adapters::http_client::ApiService<T>`
#[async_trait]
pub trait CrudService<T>: Send + Sync
where
    T: Send + Sync,
{
    async fn fetch_items(&self, filters: &Filters) -> DeskResult<ItemsPage<T>>;

    /// Fails with the server's status and message on any non-2xx answer.
    async fn fetch_item(&self, id: &str) -> DeskResult<T>;

    async fn create_item(&self, payload: &FormValues) -> DeskResult<T>;

    async fn update_item(&self, id: &str, payload: &FormValues) -> DeskResult<T>;

    async fn delete_item(&self, id: &str) -> DeskResult<()>;
}

/// One choice in a relation select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Loads the choices for a relation field from its target entity.
///
/// Implemented by:
/// - `eventdesk_adapters::http_client::ServiceDirectory`
#[async_trait]
pub trait RelationSource: Send + Sync {
    async fn options(&self, relation: &RelationMeta) -> DeskResult<Vec<SelectOption>>;
}

/// Options grouped by field name.
pub type OptionsByField = BTreeMap<String, Vec<SelectOption>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_are_dropped() {
        let filters = Filters::new()
            .set("page", 2u32)
            .set("search", None::<String>)
            .set("sortBy", "name");
        assert_eq!(
            filters.to_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("sortBy".to_string(), "name".to_string())
            ]
        );
    }

    #[test]
    fn set_replaces_in_place() {
        let filters = Filters::new().set("page", 1u32).set("limit", 10u32).set("page", 3u32);
        assert_eq!(filters.to_pairs()[0], ("page".to_string(), "3".to_string()));
        assert_eq!(filters.to_pairs().len(), 2);
    }

    #[test]
    fn fractional_numbers_keep_their_fraction() {
        let filters = Filters::new().set("minPrice", 9.5);
        assert_eq!(filters.to_pairs()[0].1, "9.5");
    }

    #[test]
    fn huge_whole_numbers_do_not_saturate() {
        let filters = Filters::new().set("big", 1e20).set("negative", -42.0);
        assert_eq!(filters.to_pairs()[0].1, "100000000000000000000");
        assert_eq!(filters.to_pairs()[1].1, "-42");
    }

    #[test]
    fn meta_uses_camel_case() {
        let meta = PageMeta {
            total: 3,
            page: 1,
            page_size: 2,
            total_pages: 2,
        };
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalPages"], 2);
    }
}
