//! Admin configuration for the built-in entities.

use super::{Actions, AdminEntityConfig, AdminRegistry, FieldOverride};
use crate::domain::error::DomainError;
use crate::domain::schema::builtin;
use crate::domain::value_objects::{FieldKind, Layout};

pub fn category_config() -> Result<AdminEntityConfig, DomainError> {
    AdminEntityConfig::builder("Category", builtin::category_schema())
        .description("Manage event categories")
        .icon("📂")
        .actions(Actions::all().without_bulk())
        .form_fields(["name", "description"])
        .query_key(["categories"])
        .endpoint("/categories")
        .build()
}

pub fn tag_config() -> Result<AdminEntityConfig, DomainError> {
    AdminEntityConfig::builder("Tag", builtin::tag_schema())
        .description("Manage the tags used to classify events")
        .icon("🏷️")
        .actions(Actions::all())
        .form_fields(["name", "description"])
        .query_key(["tags"])
        .endpoint("/tags")
        .build()
}

pub fn event_config() -> Result<AdminEntityConfig, DomainError> {
    let placed = |layout: Layout, order: u32| FieldOverride::new().layout(layout).order(order);

    AdminEntityConfig::builder("Event", builtin::event_schema())
        .icon("🎉")
        .actions(Actions::all())
        .query_key(["events"])
        .form_fields([
            "name",
            "startDate",
            "endDate",
            "location",
            "description",
            "image",
            "categoryId",
            "tags",
        ])
        .override_field("name", placed(Layout::Full, 1))
        .override_field("startDate", placed(Layout::Half, 2).kind(FieldKind::Date))
        .override_field("endDate", placed(Layout::Half, 3).kind(FieldKind::Date))
        .override_field("location", placed(Layout::Full, 4))
        .override_field("description", placed(Layout::Full, 5))
        .override_field("image", placed(Layout::Half, 6))
        .override_field("categoryId", placed(Layout::Auto, 7))
        .override_field("tags", placed(Layout::Auto, 8))
        .endpoint("/events")
        .build()
}

pub fn user_config() -> Result<AdminEntityConfig, DomainError> {
    AdminEntityConfig::builder("User", builtin::user_schema())
        .description("Accounts mirrored from the auth service")
        .icon("👤")
        .actions(Actions::read_only())
        .endpoint("/users")
        .build()
}

/// The registry served by the application.
pub fn builtin_registry() -> Result<AdminRegistry, DomainError> {
    Ok(AdminRegistry::builder()
        .register("categories", category_config()?, "/admin/categories", Some("📂"), Some(1))
        .register("tags", tag_config()?, "/admin/tags", Some("🏷️"), Some(3))
        .register("events", event_config()?, "/admin/events", Some("🎉"), Some(3))
        .register("users", user_config()?, "/admin/users", Some("👤"), None)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_menu_order() {
        let registry = builtin_registry().unwrap();
        let keys: Vec<_> = registry.menu().into_iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["categories", "tags", "events", "users"]);
    }

    #[test]
    fn event_overrides_match_form_fields() {
        let config = event_config().unwrap();
        let fields = config.form_fields.clone().unwrap();
        for field in &fields {
            assert!(config.field_overrides.contains_key(field), "{field}");
        }
        assert_eq!(config.field_meta("tags").unwrap().display.order, Some(8));
    }

    #[test]
    fn users_are_read_only() {
        let config = user_config().unwrap();
        assert_eq!(config.actions, Actions::read_only());
        assert_eq!(config.query_key, vec!["users"]);
    }
}
