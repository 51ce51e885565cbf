//! List, create and edit page scaffolds.
//!
//! Scaffolds compose a `CrudService`, an admin configuration and a
//! `ListQuery` or `FormPlan` into page behaviour. Pagination lives only in
//! the URL query string; mutations report back a `MutationOutcome` telling
//! the UI what to toast, which cached queries to invalidate and where to go.
//! Nothing is retried.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::form::{FormErrors, FormMode, FormPlan};
use crate::{
    application::ports::{CrudService, Filters, FormValues, ItemsPage, PageMeta},
    domain::{AdminEntityConfig, SortOrder},
    error::DeskResult,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ── URL state ────────────────────────────────────────────────────────────────

/// Pagination, sort and search state, round-tripped through the URL query
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    #[serde(rename = "limit")]
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: None,
            search: None,
        }
    }
}

/// Lenient view of a query string: malformed values fall back to defaults
/// instead of breaking the page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LooseQuery {
    page: Option<String>,
    limit: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
    search: Option<String>,
}

impl ListQuery {
    /// Parse `page=2&limit=20&sortBy=name&sortOrder=desc&search=jazz`. A
    /// leading `?` is ignored.
    pub fn from_query_string(query: &str) -> Self {
        let loose: LooseQuery =
            serde_urlencoded::from_str(query.trim_start_matches('?')).unwrap_or_default();
        let positive = |raw: Option<String>, fallback: u32| {
            raw.and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(fallback)
        };
        let text = |raw: Option<String>| {
            raw.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            page: positive(loose.page, 1),
            page_size: positive(loose.limit, DEFAULT_PAGE_SIZE),
            sort_by: text(loose.sort_by),
            sort_order: loose.sort_order.and_then(|s| s.parse().ok()),
            search: text(loose.search),
        }
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }

    pub fn to_filters(&self) -> Filters {
        Filters::new()
            .set("page", self.page)
            .set("limit", self.page_size)
            .set("sortBy", self.sort_by.clone())
            .set("sortOrder", self.sort_order.map(|o| o.as_str()))
            .set("search", self.search.clone())
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// New search text. Resets to the first page.
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort_by: Some(field.into()),
            sort_order: Some(order),
            page: 1,
            ..self.clone()
        }
    }

    pub fn next(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    pub fn previous(&self) -> Self {
        self.with_page(self.page.saturating_sub(1))
    }
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "to", rename_all = "lowercase")]
pub enum Navigation {
    Redirect(String),
    Back,
}

/// What the UI should do after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome<T> {
    pub toast: Toast,
    pub invalidate: Vec<Vec<String>>,
    pub navigation: Option<Navigation>,
    pub field_errors: FormErrors,
    pub data: Option<T>,
}

impl<T> MutationOutcome<T> {
    fn success(
        message: String,
        invalidate: Vec<Vec<String>>,
        navigation: Option<Navigation>,
        data: Option<T>,
    ) -> Self {
        Self {
            toast: Toast {
                kind: ToastKind::Success,
                message,
            },
            invalidate,
            navigation,
            field_errors: FormErrors::new(),
            data,
        }
    }

    /// Stay on the page with the raw error message.
    fn failure(message: String, field_errors: FormErrors) -> Self {
        Self {
            toast: Toast {
                kind: ToastKind::Error,
                message,
            },
            invalidate: Vec::new(),
            navigation: None,
            field_errors,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.toast.kind == ToastKind::Success
    }
}

// ── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
    pub query: ListQuery,
}

impl<T> ListView<T> {
    pub fn has_next(&self) -> bool {
        self.meta.page < self.meta.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.meta.page > 1
    }
}

pub struct ListScaffold<T> {
    service: Arc<dyn CrudService<T>>,
    title: String,
    query_key: Vec<String>,
}

impl<T: Send + Sync> ListScaffold<T> {
    pub fn new(service: Arc<dyn CrudService<T>>, config: &AdminEntityConfig) -> Self {
        Self {
            service,
            title: config.title.clone(),
            query_key: config.query_key.clone(),
        }
    }

    pub async fn load(&self, query: &ListQuery) -> DeskResult<ListView<T>> {
        let ItemsPage { data, meta } = self.service.fetch_items(&query.to_filters()).await?;
        Ok(ListView {
            items: data,
            meta,
            query: query.clone(),
        })
    }

    /// Delete after the user confirmed.
    pub async fn delete(&self, id: &str) -> MutationOutcome<()> {
        match self.service.delete_item(id).await {
            Ok(()) => {
                info!(entity = %self.title, %id, "Deleted");
                MutationOutcome::success(
                    format!("{} deleted", self.title),
                    vec![self.query_key.clone()],
                    None,
                    None,
                )
            }
            Err(e) => {
                warn!(entity = %self.title, %id, error = %e, "Delete failed");
                MutationOutcome::failure(e.to_string(), FormErrors::new())
            }
        }
    }
}

// ── Create / edit ────────────────────────────────────────────────────────────

pub struct FormScaffold<T> {
    service: Arc<dyn CrudService<T>>,
    plan: FormPlan,
    title: String,
    query_key: Vec<String>,
    record_id: Option<String>,
    redirect: Option<String>,
}

impl<T: Send + Sync> FormScaffold<T> {
    pub fn create(service: Arc<dyn CrudService<T>>, config: &AdminEntityConfig) -> Self {
        Self {
            service,
            plan: FormPlan::build(config, FormMode::Create, None),
            title: config.title.clone(),
            query_key: config.query_key.clone(),
            record_id: None,
            redirect: None,
        }
    }

    pub fn edit(
        service: Arc<dyn CrudService<T>>,
        config: &AdminEntityConfig,
        id: impl Into<String>,
        record: &Value,
    ) -> Self {
        Self {
            service,
            plan: FormPlan::build(config, FormMode::Edit, Some(record)),
            title: config.title.clone(),
            query_key: config.query_key.clone(),
            record_id: Some(id.into()),
            redirect: None,
        }
    }

    /// Navigate here on success instead of going back.
    pub fn redirect_to(mut self, href: impl Into<String>) -> Self {
        self.redirect = Some(href.into());
        self
    }

    pub fn plan(&self) -> &FormPlan {
        &self.plan
    }

    pub fn plan_mut(&mut self) -> &mut FormPlan {
        &mut self.plan
    }

    /// Validate, then run the one mutation this form owns.
    pub async fn submit(&self, values: &FormValues) -> MutationOutcome<T> {
        let payload = match self.plan.submit(values) {
            Ok(payload) => payload,
            Err(errors) => {
                return MutationOutcome::failure("Please fix the highlighted fields".into(), errors);
            }
        };

        let result = match &self.record_id {
            None => self.service.create_item(&payload).await,
            Some(id) => self.service.update_item(id, &payload).await,
        };

        match result {
            Ok(item) => {
                let mut invalidate = vec![self.query_key.clone()];
                let verb = match &self.record_id {
                    None => "created",
                    Some(id) => {
                        let mut detail = self.query_key.clone();
                        detail.push(id.clone());
                        invalidate.push(detail);
                        "updated"
                    }
                };
                let navigation = Some(
                    self.redirect
                        .clone()
                        .map_or(Navigation::Back, Navigation::Redirect),
                );
                MutationOutcome::success(
                    format!("{} {verb}", self.title),
                    invalidate,
                    navigation,
                    Some(item),
                )
            }
            Err(e) => {
                warn!(entity = %self.title, error = %e, "Mutation failed");
                MutationOutcome::failure(e.to_string(), FormErrors::new())
            }
        }
    }
}
