//! Admin entity configuration and its typestate builder.
//!
//! # Typestate builder
//!
//! A configuration is useless without the REST endpoint its CRUD client
//! talks to, so the builder starts in `NoEndpoint` and only exposes
//! `build()` once `.endpoint()` has moved it to `HasEndpoint`. Cross-field
//! checks (form fields and overrides must name schema fields) still run at
//! `build()`.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::schema::{EntitySchema, FieldMeta};
use crate::domain::value_objects::{FieldKind, Layout, Widget};

// ── Actions ──────────────────────────────────────────────────────────────────

/// Which CRUD operations the admin UI offers for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub bulk: bool,
}

impl Actions {
    pub const fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
            bulk: true,
        }
    }

    pub const fn read_only() -> Self {
        Self {
            create: false,
            read: true,
            update: false,
            delete: false,
            bulk: false,
        }
    }

    pub const fn without_bulk(self) -> Self {
        Self { bulk: false, ..self }
    }
}

impl Default for Actions {
    fn default() -> Self {
        Self::all().without_bulk()
    }
}

// ── Field overrides ──────────────────────────────────────────────────────────

/// Per-entity adjustments layered over a schema field's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<Widget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_form: Option<bool>,
}

impl FieldOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn widget(mut self, widget: Widget) -> Self {
        self.widget = Some(widget);
        self
    }

    /// Merge into `meta`. Set values win; unset values leave `meta` alone.
    pub fn apply_to(&self, meta: &mut FieldMeta) {
        if let Some(kind) = self.kind {
            meta.kind = kind;
        }
        if let Some(label) = &self.label {
            meta.label = label.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            meta.placeholder = Some(placeholder.clone());
        }
        if let Some(layout) = self.layout {
            meta.display.layout = layout;
        }
        if let Some(order) = self.order {
            meta.display.order = Some(order);
        }
        if let Some(widget) = self.widget {
            meta.display.widget = Some(widget);
        }
        if let Some(show) = self.show_in_form {
            meta.display.show_in_form = show;
        }
    }
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Everything the admin UI needs to generate CRUD screens for one entity.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEntityConfig {
    pub title: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub actions: Actions,
    /// REST collection path the CRUD client is bound to, e.g. `/events`.
    pub endpoint: String,
    pub query_key: Vec<String>,
    pub form_fields: Option<Vec<String>>,
    pub field_overrides: BTreeMap<String, FieldOverride>,
    pub parent: Option<String>,
    pub schema: EntitySchema,
}

impl AdminEntityConfig {
    pub fn builder(
        title: impl Into<String>,
        schema: EntitySchema,
    ) -> AdminEntityConfigBuilder<NoEndpoint> {
        AdminEntityConfigBuilder::new(title.into(), schema)
    }

    /// Schema metadata for `field` with this entity's override applied.
    pub fn field_meta(&self, field: &str) -> Option<FieldMeta> {
        let descriptor = self.schema.get(field)?;
        let mut meta = descriptor.meta.clone();
        if let Some(over) = self.field_overrides.get(field) {
            over.apply_to(&mut meta);
        }
        Some(meta)
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoEndpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasEndpoint;

#[derive(Debug, Clone)]
pub struct AdminEntityConfigBuilder<S> {
    title: String,
    schema: EntitySchema,
    icon: Option<String>,
    description: Option<String>,
    actions: Actions,
    endpoint: String,
    query_key: Option<Vec<String>>,
    form_fields: Option<Vec<String>>,
    field_overrides: BTreeMap<String, FieldOverride>,
    parent: Option<String>,
    _state: PhantomData<S>,
}

impl AdminEntityConfigBuilder<NoEndpoint> {
    fn new(title: String, schema: EntitySchema) -> Self {
        Self {
            title,
            schema,
            icon: None,
            description: None,
            actions: Actions::default(),
            endpoint: String::new(),
            query_key: None,
            form_fields: None,
            field_overrides: BTreeMap::new(),
            parent: None,
            _state: PhantomData,
        }
    }

    /// Bind the REST collection path. A missing leading `/` is added.
    pub fn endpoint(self, path: impl Into<String>) -> AdminEntityConfigBuilder<HasEndpoint> {
        let path = path.into();
        let endpoint = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        AdminEntityConfigBuilder {
            title: self.title,
            schema: self.schema,
            icon: self.icon,
            description: self.description,
            actions: self.actions,
            endpoint,
            query_key: self.query_key,
            form_fields: self.form_fields,
            field_overrides: self.field_overrides,
            parent: self.parent,
            _state: PhantomData,
        }
    }
}

impl<S> AdminEntityConfigBuilder<S> {
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn actions(mut self, actions: Actions) -> Self {
        self.actions = actions;
        self
    }

    pub fn query_key<I, T>(mut self, key: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.query_key = Some(key.into_iter().map(Into::into).collect());
        self
    }

    pub fn form_fields<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.form_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn override_field(mut self, field: impl Into<String>, over: FieldOverride) -> Self {
        self.field_overrides.insert(field.into(), over);
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl AdminEntityConfigBuilder<HasEndpoint> {
    pub fn build(self) -> Result<AdminEntityConfig, DomainError> {
        let invalid = |reason: String| DomainError::InvalidAdminConfig {
            entity: self.title.clone(),
            reason,
        };

        if self.title.trim().is_empty() {
            return Err(invalid("title must not be empty".into()));
        }
        if self.endpoint.len() < 2 {
            return Err(invalid("endpoint must name a collection".into()));
        }
        if let Some(fields) = &self.form_fields {
            if let Some(unknown) = fields.iter().find(|f| !self.schema.contains(f)) {
                return Err(invalid(format!("form field '{unknown}' is not in the schema")));
            }
        }
        if let Some(unknown) = self
            .field_overrides
            .keys()
            .find(|f| !self.schema.contains(f))
        {
            return Err(invalid(format!("override for unknown field '{unknown}'")));
        }

        let query_key = self
            .query_key
            .unwrap_or_else(|| vec![self.endpoint.trim_start_matches('/').to_string()]);

        Ok(AdminEntityConfig {
            title: self.title,
            icon: self.icon,
            description: self.description,
            actions: self.actions,
            endpoint: self.endpoint,
            query_key,
            form_fields: self.form_fields,
            field_overrides: self.field_overrides,
            parent: self.parent,
            schema: self.schema,
        })
    }
}
