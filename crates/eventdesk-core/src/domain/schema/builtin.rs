//! Schemas for the built-in entities.

use super::{EntitySchema, Field};
use crate::domain::value_objects::{Cardinality, Layout, Widget};

/// Server-managed keys never accepted on create.
const MANAGED: &[&str] = &["id", "createdAt", "updatedAt"];

pub fn event_schema() -> EntitySchema {
    EntitySchema::new("Event")
        .field("id", Field::string("ID").read_only().hidden_in_form().optional())
        .field(
            "name",
            Field::string("Name")
                .min_len(1, "Name is required")
                .max_len(255, "255 characters max"),
        )
        .field("image", Field::image("Image").optional())
        .field("startDate", Field::date("Start date"))
        .field("endDate", Field::date("End date"))
        .field(
            "location",
            Field::string("Location")
                .min_len(1, "Location is required")
                .max_len(255, "255 characters max"),
        )
        .field("description", Field::textarea("Description").optional())
        .field(
            "categoryId",
            Field::relation("categories", "name", Cardinality::Single, "Category")
                .widget(Widget::Select)
                .optional(),
        )
        .field(
            "tags",
            Field::relation("tags", "name", Cardinality::Multiple, "Tags")
                .widget(Widget::Tag)
                .optional(),
        )
        .field(
            "creatorId",
            Field::string("Creator").read_only().hidden_in_form().optional(),
        )
        .field("createdAt", Field::date("Created").hidden_in_form().optional())
        .field(
            "updatedAt",
            Field::date("Updated")
                .hidden_in_form()
                .hidden_in_table()
                .optional(),
        )
}

pub fn event_create_schema() -> EntitySchema {
    event_schema().omit(&["id", "createdAt", "updatedAt", "creatorId"])
}

pub fn event_update_schema() -> EntitySchema {
    event_create_schema().partial()
}

pub fn tag_schema() -> EntitySchema {
    label_schema("Tag")
        .field(
            "name",
            Field::string("Name")
                .min_len(1, "Name is required")
                .max_len(100, "100 characters max"),
        )
        .field("description", Field::textarea("Description").optional())
}

pub fn category_schema() -> EntitySchema {
    label_schema("Category")
        .field(
            "name",
            Field::string("Name")
                .placeholder("Category name")
                .min_len(2, "Name must be at least 2 characters")
                .max_len(100, "100 characters max"),
        )
        .field(
            "description",
            Field::textarea("Description")
                .placeholder("Description (optional)")
                .max_len(500, "500 characters max")
                .optional(),
        )
}

/// Create schema for any label-like schema.
pub fn create_schema(full: &EntitySchema) -> EntitySchema {
    full.omit(MANAGED)
}

pub fn user_schema() -> EntitySchema {
    EntitySchema::new("User")
        .field("id", Field::string("ID").read_only().hidden_in_form())
        .field("name", Field::string("Name").read_only())
        .field("email", Field::string("Email").read_only())
        .field("role", Field::string("Role").read_only().optional())
        .field(
            "image",
            Field::image("Avatar")
                .read_only()
                .hidden_in_table()
                .optional(),
        )
        .field("createdAt", Field::date("Joined").hidden_in_form().optional())
        .field(
            "updatedAt",
            Field::date("Updated")
                .hidden_in_form()
                .hidden_in_table()
                .optional(),
        )
}

/// Common skeleton: server-managed id and timestamps first, editable fields
/// filled in by the caller.
fn label_schema(entity: &str) -> EntitySchema {
    EntitySchema::new(entity)
        .field(
            "id",
            Field::string("ID")
                .hidden_in_form()
                .hidden_in_table()
                .optional(),
        )
        .field("name", Field::string("Name"))
        .field("description", Field::textarea("Description").optional())
        .field(
            "createdAt",
            Field::date("Created").layout(Layout::Half).hidden_in_form().optional(),
        )
        .field(
            "updatedAt",
            Field::date("Updated").layout(Layout::Half).hidden_in_form().optional(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_create_schema_omits_managed_keys() {
        let schema = event_create_schema();
        for key in ["id", "createdAt", "updatedAt", "creatorId"] {
            assert!(!schema.contains(key), "{key} should be omitted");
        }
        assert!(schema.contains("tags"));
    }

    #[test]
    fn launch_payload_is_valid() {
        let payload = json!({
            "name": "Launch",
            "startDate": "2025-01-01T10:00:00Z",
            "endDate": "2025-01-01T12:00:00Z",
            "location": "Paris",
            "tags": ["t1", "t2"]
        });
        assert!(event_create_schema().validate(&payload).is_ok());
    }

    #[test]
    fn category_name_rules() {
        let schema = create_schema(&category_schema());
        let err = schema.validate(&json!({"name": "x"})).unwrap_err();
        assert_eq!(
            err.for_field("name").unwrap(),
            ["Name must be at least 2 characters"]
        );
        let long = "d".repeat(501);
        let err = schema
            .validate(&json!({"name": "Music", "description": long}))
            .unwrap_err();
        assert_eq!(err.for_field("description").unwrap(), ["500 characters max"]);
    }

    #[test]
    fn label_fields_keep_skeleton_order() {
        let names: Vec<_> = tag_schema().names().map(str::to_string).collect();
        assert_eq!(names, ["id", "name", "description", "createdAt", "updatedAt"]);
    }

    #[test]
    fn update_schema_is_fully_optional() {
        assert!(event_update_schema().validate(&json!({})).is_ok());
        assert!(
            event_update_schema()
                .validate(&json!({"tags": []}))
                .is_ok()
        );
    }
}
