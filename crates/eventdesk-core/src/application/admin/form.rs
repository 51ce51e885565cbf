//! Dynamic form planning.
//!
//! A `FormPlan` is everything a renderer needs to draw a create or edit form
//! for one admin entity: which fields, in what order, how they pack into a
//! two-column grid, their initial values and the options of relation
//! fields. It also validates submissions. It never writes to the network;
//! the embedding scaffold owns the mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    application::ports::{FormValues, RelationSource, SelectOption},
    domain::{AdminEntityConfig, EntitySchema, FieldKind, FieldMeta, Layout},
    error::DeskResult,
};

/// Grid width in columns.
pub const GRID_COLUMNS: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedField {
    pub name: String,
    pub meta: FieldMeta,
    pub required: bool,
    /// Columns occupied, 1 or 2.
    pub span: u8,
    pub value: Value,
    pub options: Vec<SelectOption>,
}

/// First error message per field.
pub type FormErrors = BTreeMap<String, String>;

/// Key used in `FormErrors` for errors about the form as a whole.
pub const FORM_ERROR_KEY: &str = "_form";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPlan {
    pub entity: String,
    pub mode: FormMode,
    pub fields: Vec<PlannedField>,
    /// Field names per grid row.
    pub rows: Vec<Vec<String>>,
    #[serde(skip)]
    schema: EntitySchema,
}

impl FormPlan {
    pub fn build(config: &AdminEntityConfig, mode: FormMode, initial: Option<&Value>) -> Self {
        let names: Vec<String> = match &config.form_fields {
            Some(fields) => fields.clone(),
            None => config
                .schema
                .names()
                .filter(|name| {
                    config
                        .field_meta(name)
                        .is_some_and(|meta| meta.display.show_in_form)
                })
                .map(str::to_string)
                .collect(),
        };

        let mut fields: Vec<PlannedField> = names
            .iter()
            .filter_map(|name| {
                let descriptor = config.schema.get(name)?;
                let meta = config.field_meta(name)?;
                let value = match (mode, initial) {
                    (FormMode::Edit, Some(record)) => initial_value(name, &meta, record),
                    _ => empty_value(&meta),
                };
                Some(PlannedField {
                    name: name.clone(),
                    span: span(&meta),
                    required: !descriptor.validator.optional,
                    meta,
                    value,
                    options: Vec::new(),
                })
            })
            .collect();

        // Ordered fields first, then unordered in declaration order.
        fields.sort_by_key(|f| (f.meta.display.order.is_none(), f.meta.display.order));

        let rows = pack_rows(&fields);
        let picked: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        let schema = match mode {
            FormMode::Create => config.schema.pick(&picked),
            FormMode::Edit => config.schema.pick(&picked).partial(),
        };

        Self {
            entity: config.title.clone(),
            mode,
            fields,
            rows,
            schema,
        }
    }

    pub fn field(&self, name: &str) -> Option<&PlannedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Current values keyed by field name.
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Fetch options for every relation field. Nothing is cached: each call
    /// asks the source again.
    pub async fn load_options(&mut self, source: &dyn RelationSource) -> DeskResult<()> {
        for field in &mut self.fields {
            if let Some(relation) = &field.meta.relation {
                field.options = source.options(relation).await?;
                debug!(field = %field.name, count = field.options.len(), "Relation options loaded");
            }
        }
        Ok(())
    }

    /// Validate a submission.
    ///
    /// Keys outside the plan are discarded. An empty string for an optional
    /// field is dropped when creating and sent as `null` when editing, which
    /// clears the stored value. Returns the cleaned values, or the first
    /// error per field.
    pub fn submit(&self, values: &FormValues) -> Result<FormValues, FormErrors> {
        let mut cleaned = FormValues::new();
        for field in &self.fields {
            let Some(value) = values.get(&field.name) else {
                continue;
            };
            let blank = value.as_str().is_some_and(|s| s.trim().is_empty());
            match (blank && !field.required, self.mode) {
                (true, FormMode::Create) => continue,
                (true, FormMode::Edit) => {
                    cleaned.insert(field.name.clone(), Value::Null);
                }
                (false, _) => {
                    cleaned.insert(field.name.clone(), value.clone());
                }
            }
        }

        let payload = Value::Object(cleaned);
        match self.schema.validate(&payload) {
            Ok(()) => match payload {
                Value::Object(map) => Ok(map),
                _ => Ok(FormValues::new()),
            },
            Err(errors) => {
                let mut first = errors.first_per_field();
                if let Some(message) = errors.form_errors.first() {
                    first.insert(FORM_ERROR_KEY.to_string(), message.clone());
                }
                Err(first)
            }
        }
    }
}

fn span(meta: &FieldMeta) -> u8 {
    match meta.display.layout {
        Layout::Full => GRID_COLUMNS,
        Layout::Half => 1,
        Layout::Auto if meta.is_multi_relation() => GRID_COLUMNS,
        Layout::Auto => 1,
    }
}

fn pack_rows(fields: &[PlannedField]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut width = 0;
    for field in fields {
        if rows.is_empty() || width + field.span > GRID_COLUMNS {
            rows.push(Vec::new());
            width = 0;
        }
        width += field.span;
        if let Some(row) = rows.last_mut() {
            row.push(field.name.clone());
        }
    }
    rows
}

fn empty_value(meta: &FieldMeta) -> Value {
    match meta.kind {
        FieldKind::Relation if meta.is_multi_relation() => Value::Array(Vec::new()),
        FieldKind::Relation => Value::Null,
        _ => Value::String(String::new()),
    }
}

/// Initial value for an edit form, read from the record being edited.
///
/// Null text becomes `""`. Relation fields accept either ids or embedded
/// objects: `tags: [{id, name}]` becomes `["id"]`, and a missing
/// `categoryId` is read from an embedded `category` object.
fn initial_value(name: &str, meta: &FieldMeta, record: &Value) -> Value {
    let raw = record.get(name).cloned().unwrap_or(Value::Null);

    if meta.kind != FieldKind::Relation {
        return match raw {
            Value::Null => empty_value(meta),
            other => other,
        };
    }

    if meta.is_multi_relation() {
        let items = raw.as_array().cloned().unwrap_or_default();
        return Value::Array(items.iter().filter_map(reference_id).collect());
    }

    if !raw.is_null() {
        return reference_id(&raw).unwrap_or(Value::Null);
    }
    name.strip_suffix("Id")
        .and_then(|stem| record.get(stem))
        .and_then(reference_id)
        .unwrap_or(Value::Null)
}

fn reference_id(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Object(map) => map.get("id").filter(|id| id.is_string()).cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SelectOption;
    use crate::domain::admin::builtin::{category_config, event_config};
    use crate::domain::schema::RelationMeta;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl RelationSource for CountingSource {
        async fn options(&self, relation: &RelationMeta) -> DeskResult<Vec<SelectOption>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![SelectOption {
                value: format!("{}-1", relation.target),
                label: "First".into(),
            }])
        }
    }

    #[test]
    fn event_form_follows_override_order_and_packs_rows() {
        let plan = FormPlan::build(&event_config().unwrap(), FormMode::Create, None);
        let names: Vec<_> = plan.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "name",
                "startDate",
                "endDate",
                "location",
                "description",
                "image",
                "categoryId",
                "tags"
            ]
        );
        assert_eq!(
            plan.rows,
            vec![
                vec!["name"],
                vec!["startDate", "endDate"],
                vec!["location"],
                vec!["description"],
                vec!["image", "categoryId"],
                vec!["tags"],
            ]
        );
        assert_eq!(plan.field("tags").unwrap().value, json!([]));
    }

    #[test]
    fn without_form_fields_uses_show_in_form() {
        let mut config = category_config().unwrap();
        config.form_fields = None;
        let plan = FormPlan::build(&config, FormMode::Create, None);
        let names: Vec<_> = plan.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "description"]);
    }

    #[test]
    fn edit_reads_embedded_relations() {
        let record = json!({
            "id": "e1",
            "name": "Launch",
            "image": null,
            "category": {"id": "c1", "name": "Music"},
            "tags": [{"id": "t1", "name": "a"}, {"id": "t2", "name": "b"}]
        });
        let plan = FormPlan::build(&event_config().unwrap(), FormMode::Edit, Some(&record));
        assert_eq!(plan.field("image").unwrap().value, json!(""));
        assert_eq!(plan.field("categoryId").unwrap().value, json!("c1"));
        assert_eq!(plan.field("tags").unwrap().value, json!(["t1", "t2"]));
        assert_eq!(plan.values()["name"], json!("Launch"));
    }

    #[test]
    fn submit_drops_empty_optional_strings() {
        let plan = FormPlan::build(&event_config().unwrap(), FormMode::Create, None);
        let values = json!({
            "name": "Launch",
            "startDate": "2025-01-01T10:00",
            "endDate": "2025-01-01T12:00",
            "location": "Paris",
            "description": "",
            "image": "",
            "tags": ["t1"],
            "unplanned": "x"
        });
        let cleaned = plan.submit(values.as_object().unwrap()).unwrap();
        assert!(!cleaned.contains_key("description"));
        assert!(!cleaned.contains_key("image"));
        assert!(!cleaned.contains_key("unplanned"));
        assert_eq!(cleaned["tags"], json!(["t1"]));
    }

    #[test]
    fn submit_reports_first_error_per_field() {
        let plan = FormPlan::build(&category_config().unwrap(), FormMode::Create, None);
        let errors = plan
            .submit(json!({"name": "x"}).as_object().unwrap())
            .unwrap_err();
        assert_eq!(errors["name"], "Name must be at least 2 characters");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn edit_submissions_may_be_partial() {
        let plan = FormPlan::build(&event_config().unwrap(), FormMode::Edit, Some(&json!({})));
        assert!(plan.submit(json!({"location": "Lyon"}).as_object().unwrap()).is_ok());
    }

    #[test]
    fn edit_sends_null_for_cleared_optional_fields() {
        let record = json!({"name": "Launch", "description": "old text", "location": "Paris"});
        let plan = FormPlan::build(&event_config().unwrap(), FormMode::Edit, Some(&record));
        let cleaned = plan
            .submit(
                json!({"name": "Launch", "description": "", "categoryId": ""})
                    .as_object()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(cleaned["description"], Value::Null);
        assert_eq!(cleaned["categoryId"], Value::Null);
        assert_eq!(cleaned["name"], json!("Launch"));
        assert!(!cleaned.contains_key("image"));
    }

    #[tokio::test]
    async fn options_are_refetched_on_every_load() {
        let source = CountingSource(AtomicUsize::new(0));
        let mut plan = FormPlan::build(&event_config().unwrap(), FormMode::Create, None);
        plan.load_options(&source).await.unwrap();
        plan.load_options(&source).await.unwrap();
        assert_eq!(source.0.load(Ordering::SeqCst), 4);
        assert_eq!(plan.field("tags").unwrap().options[0].value, "tags-1");
        assert!(plan.field("name").unwrap().options.is_empty());
    }
}
