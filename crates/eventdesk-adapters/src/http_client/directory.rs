use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use eventdesk_core::application::pagination::MAX_LIMIT;
use eventdesk_core::application::ports::{Filters, RelationSource, SelectOption};
use eventdesk_core::domain::schema::RelationMeta;
use eventdesk_core::prelude::*;

use super::ApiService;

/// Builds `ApiService`s for registered admin entities and resolves
/// relation options through them.
#[derive(Debug, Clone)]
pub struct ServiceDirectory {
    client: Client,
    base_url: String,
    token: Option<String>,
    registry: Arc<AdminRegistry>,
}

impl ServiceDirectory {
    pub fn new(base_url: impl Into<String>, registry: Arc<AdminRegistry>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
            registry,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn registry(&self) -> &AdminRegistry {
        &self.registry
    }

    /// The service for the entity registered under `key`.
    pub fn service<T>(&self, key: &str) -> DeskResult<ApiService<T>> {
        let entry = self.registry.get(key)?;
        let service = ApiService::with_client(
            self.client.clone(),
            self.base_url.clone(),
            entry.config.endpoint.clone(),
        );
        Ok(match &self.token {
            Some(token) => service.with_token(token.clone()),
            None => service,
        })
    }
}

#[async_trait]
impl RelationSource for ServiceDirectory {
    /// First page (up to the maximum page size) of the target collection,
    /// as `{value: id, label: <display field>}`. Items without a text id
    /// are skipped; a missing display field falls back to the id.
    #[instrument(skip_all, fields(target = %relation.target))]
    async fn options(&self, relation: &RelationMeta) -> DeskResult<Vec<SelectOption>> {
        let service: ApiService<Value> = self.service(&relation.target)?;
        let page = service
            .fetch_items(&Filters::new().set("limit", MAX_LIMIT))
            .await?;

        let options: Vec<SelectOption> = page
            .data
            .iter()
            .filter_map(|item| {
                let value = item.get("id")?.as_str()?;
                let label = item
                    .get(&relation.display_field)
                    .and_then(Value::as_str)
                    .unwrap_or(value);
                Some(SelectOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
            })
            .collect();

        debug!(count = options.len(), "Loaded relation options");
        Ok(options)
    }
}
