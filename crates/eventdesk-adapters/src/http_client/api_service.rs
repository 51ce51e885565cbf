use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use eventdesk_core::application::ErrorBody;
use eventdesk_core::application::ports::{Filters, FormValues, ItemsPage, PageMeta};
use eventdesk_core::prelude::*;

fn transport(e: impl ToString) -> DeskError {
    ApplicationError::Transport {
        reason: e.to_string(),
    }
    .into()
}

/// `CrudService<T>` over HTTP for the collection at `base_url + endpoint`.
///
/// Requests are sent once. A non-2xx answer becomes
/// `ApplicationError::Remote` carrying the status and the envelope's error
/// message; a 400 with a field-error body becomes a validation error so
/// forms can show it inline.
#[derive(Debug, Clone)]
pub struct ApiService<T> {
    client: Client,
    base_url: String,
    endpoint: String,
    token: Option<String>,
    _item: PhantomData<fn() -> T>,
}

impl<T> ApiService<T> {
    pub fn new(base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, endpoint)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        let endpoint = if endpoint.starts_with('/') {
            endpoint
        } else {
            format!("/{endpoint}")
        };
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            endpoint,
            token: None,
            _item: PhantomData,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn collection_url(&self) -> DeskResult<Url> {
        Url::parse(&format!("{}{}", self.base_url, self.endpoint)).map_err(|e| {
            DeskError::configuration(format!("invalid API url '{}': {e}", self.base_url))
        })
    }

    fn item_url(&self, id: &str) -> DeskResult<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| {
                DeskError::configuration(format!("'{}' cannot be a base url", self.base_url))
            })?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Decode a response body, turning error answers into errors.
async fn read<R: DeserializeOwned>(response: Response) -> DeskResult<R> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !status.is_success() {
        let error = serde_json::from_str::<Envelope<Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.error);
        warn!(status = status.as_u16(), "API request failed");
        return Err(match error {
            Some(ErrorBody::Validation(errors)) if status.as_u16() == 400 => {
                DomainError::Validation(errors).into()
            }
            Some(error) => ApplicationError::Remote {
                status: status.as_u16(),
                message: error.message(),
            }
            .into(),
            None => ApplicationError::Remote {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Request failed").to_string(),
            }
            .into(),
        });
    }

    serde_json::from_str(&body).map_err(|e| transport(format!("unreadable response: {e}")))
}

fn unwrap_data<T>(envelope: Envelope<T>) -> DeskResult<T> {
    envelope
        .data
        .ok_or_else(|| transport("response carried no data"))
}

#[async_trait]
impl<T> CrudService<T> for ApiService<T>
where
    T: DeserializeOwned + Send + Sync,
{
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn fetch_items(&self, filters: &Filters) -> DeskResult<ItemsPage<T>> {
        let request = self
            .client
            .get(self.collection_url()?)
            .query(&filters.to_pairs());
        let response = self.authorize(request).send().await.map_err(transport)?;
        let list: ListEnvelope<T> = read(response).await?;
        debug!(total = list.total, page = list.page, "Fetched items");
        Ok(ItemsPage {
            meta: PageMeta {
                total: list.total,
                page: list.page,
                page_size: list.limit,
                total_pages: list.total_pages,
            },
            data: list.data,
        })
    }

    async fn fetch_item(&self, id: &str) -> DeskResult<T> {
        let request = self.client.get(self.item_url(id)?);
        let response = self.authorize(request).send().await.map_err(transport)?;
        unwrap_data(read(response).await?)
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn create_item(&self, payload: &FormValues) -> DeskResult<T> {
        let request = self.client.post(self.collection_url()?).json(payload);
        let response = self.authorize(request).send().await.map_err(transport)?;
        unwrap_data(read(response).await?)
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint, id = %id))]
    async fn update_item(&self, id: &str, payload: &FormValues) -> DeskResult<T> {
        let request = self.client.put(self.item_url(id)?).json(payload);
        let response = self.authorize(request).send().await.map_err(transport)?;
        unwrap_data(read(response).await?)
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint, id = %id))]
    async fn delete_item(&self, id: &str) -> DeskResult<()> {
        let request = self.client.delete(self.item_url(id)?);
        let response = self.authorize(request).send().await.map_err(transport)?;
        let _: Envelope<Value> = read(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_gets_leading_slash() {
        let service: ApiService<Value> = ApiService::new("http://localhost:3000/", "events");
        assert_eq!(service.endpoint(), "/events");
        assert_eq!(
            service.collection_url().unwrap().as_str(),
            "http://localhost:3000/events"
        );
    }

    #[test]
    fn item_ids_are_path_encoded() {
        let service: ApiService<Value> = ApiService::new("http://localhost:3000", "/tags");
        assert_eq!(
            service.item_url("a/b c").unwrap().as_str(),
            "http://localhost:3000/tags/a%2Fb%20c"
        );
    }
}
