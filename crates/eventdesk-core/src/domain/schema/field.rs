//! Field descriptors: a validator paired with presentation metadata.
//!
//! The two halves are independent. Chaining `.min_len()` touches only the
//! validator; chaining `.layout()` touches only the metadata. Renderers read
//! `meta`, parsers read `validator`, and neither has to know about the other.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{EntityId, parse_datetime};
use crate::domain::value_objects::{Cardinality, FieldKind, Layout, Widget};

// ── Validator ────────────────────────────────────────────────────────────────

/// Accepted JSON shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Text,
    DateTime,
    Reference,
    ReferenceList,
}

/// A length rule with the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    MinLength { len: usize, message: String },
    MaxLength { len: usize, message: String },
}

impl Rule {
    fn check(&self, text: &str) -> Option<&str> {
        let count = text.chars().count();
        match self {
            Self::MinLength { len, message } if count < *len => Some(message.as_str()),
            Self::MaxLength { len, message } if count > *len => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidator {
    pub value_type: ValueType,
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl FieldValidator {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Check one value, returning every failing message in rule order.
    ///
    /// `None` means the key was absent. Absent and `null` are both accepted
    /// for optional fields.
    pub fn check(&self, value: Option<&Value>) -> Vec<String> {
        let value = match value {
            None | Some(Value::Null) if self.optional => return Vec::new(),
            None | Some(Value::Null) => return vec!["Required".to_string()],
            Some(v) => v,
        };

        match self.value_type {
            ValueType::Text => match value.as_str() {
                Some(text) => self
                    .rules
                    .iter()
                    .filter_map(|rule| rule.check(text))
                    .map(str::to_string)
                    .collect(),
                None => vec![format!("Expected string, received {}", type_name(value))],
            },
            ValueType::DateTime => match value.as_str() {
                Some(text) if parse_datetime(text).is_some() => Vec::new(),
                _ => vec!["Invalid date".to_string()],
            },
            ValueType::Reference => match value.as_str() {
                Some(text) if EntityId::parse(text).is_ok() => Vec::new(),
                _ => vec!["Invalid identifier".to_string()],
            },
            ValueType::ReferenceList => match value.as_array() {
                Some(items)
                    if items
                        .iter()
                        .all(|v| v.as_str().is_some_and(|s| EntityId::parse(s).is_ok())) =>
                {
                    Vec::new()
                }
                Some(_) => vec!["Invalid identifier in list".to_string()],
                None => vec![format!("Expected array, received {}", type_name(value))],
            },
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Metadata ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRules {
    pub show_in_form: bool,
    pub show_in_table: bool,
    pub layout: Layout,
    pub order: Option<u32>,
    pub widget: Option<Widget>,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            show_in_form: true,
            show_in_table: true,
            layout: Layout::Auto,
            order: None,
            widget: None,
        }
    }
}

/// Where a relation field points and how its options are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationMeta {
    pub target: String,
    pub display_field: String,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub kind: FieldKind,
    pub label: String,
    pub placeholder: Option<String>,
    pub read_only: bool,
    pub display: DisplayRules,
    pub relation: Option<RelationMeta>,
}

impl FieldMeta {
    /// Widget to render when none was set explicitly.
    pub fn effective_widget(&self) -> Widget {
        if let Some(widget) = self.display.widget {
            return widget;
        }
        match (self.kind, &self.relation) {
            (FieldKind::Relation, Some(rel)) if rel.cardinality.is_multiple() => Widget::Tag,
            (FieldKind::Relation, _) => Widget::Select,
            (FieldKind::Textarea, _) => Widget::Textarea,
            (FieldKind::Date, _) => Widget::DatePicker,
            (FieldKind::Image, _) => Widget::Upload,
            (FieldKind::String, _) => Widget::Input,
        }
    }

    pub fn is_multi_relation(&self) -> bool {
        self.relation
            .as_ref()
            .is_some_and(|rel| rel.cardinality.is_multiple())
    }
}

// ── Descriptor ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub validator: FieldValidator,
    pub meta: FieldMeta,
}

/// Entry points for building descriptors.
pub struct Field;

impl Field {
    pub fn string(label: impl Into<String>) -> FieldDescriptor {
        FieldDescriptor::new(ValueType::Text, FieldKind::String, label)
    }

    pub fn textarea(label: impl Into<String>) -> FieldDescriptor {
        FieldDescriptor::new(ValueType::Text, FieldKind::Textarea, label)
    }

    pub fn date(label: impl Into<String>) -> FieldDescriptor {
        FieldDescriptor::new(ValueType::DateTime, FieldKind::Date, label)
    }

    pub fn image(label: impl Into<String>) -> FieldDescriptor {
        FieldDescriptor::new(ValueType::Text, FieldKind::Image, label)
    }

    /// A reference to `target` records, labelled by their `display_field`.
    pub fn relation(
        target: impl Into<String>,
        display_field: impl Into<String>,
        cardinality: Cardinality,
        label: impl Into<String>,
    ) -> FieldDescriptor {
        let value_type = match cardinality {
            Cardinality::Single => ValueType::Reference,
            Cardinality::Multiple => ValueType::ReferenceList,
        };
        let mut field = FieldDescriptor::new(value_type, FieldKind::Relation, label);
        field.meta.relation = Some(RelationMeta {
            target: target.into(),
            display_field: display_field.into(),
            cardinality,
        });
        field
    }
}

impl FieldDescriptor {
    fn new(value_type: ValueType, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            validator: FieldValidator::new(value_type),
            meta: FieldMeta {
                kind,
                label: label.into(),
                placeholder: None,
                read_only: false,
                display: DisplayRules::default(),
                relation: None,
            },
        }
    }

    // Validation chain

    pub fn min_len(mut self, len: usize, message: impl Into<String>) -> Self {
        self.validator.rules.push(Rule::MinLength {
            len,
            message: message.into(),
        });
        self
    }

    pub fn max_len(mut self, len: usize, message: impl Into<String>) -> Self {
        self.validator.rules.push(Rule::MaxLength {
            len,
            message: message.into(),
        });
        self
    }

    pub fn optional(mut self) -> Self {
        self.validator.optional = true;
        self
    }

    // Presentation chain

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.meta.placeholder = Some(text.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.meta.read_only = true;
        self
    }

    pub fn hidden_in_form(mut self) -> Self {
        self.meta.display.show_in_form = false;
        self
    }

    pub fn hidden_in_table(mut self) -> Self {
        self.meta.display.show_in_table = false;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.meta.display.layout = layout;
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.meta.display.order = Some(order);
        self
    }

    pub fn widget(mut self, widget: Widget) -> Self {
        self.meta.display.widget = Some(widget);
        self
    }

    pub fn check(&self, value: Option<&Value>) -> Vec<String> {
        self.validator.check(value)
    }
}
