//! Tags and categories.
//!
//! Both are a name plus an optional description and share storage logic, so
//! they are one generic type distinguished by a zero-sized kind marker. A
//! `Tag` can never be passed where a `Category` is expected.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::domain::error::DomainError;
use crate::domain::schema::{EntitySchema, builtin};

/// Static facts about one kind of label.
pub trait LabelKind:
    fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// Human name used in messages ("Tag").
    const ENTITY: &'static str;
    /// Storage table.
    const TABLE: &'static str;
    /// Admin registry key and REST collection ("tags").
    const KEY: &'static str;

    /// Full schema for this kind.
    fn schema() -> EntitySchema;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryKind;

impl LabelKind for TagKind {
    const ENTITY: &'static str = "Tag";
    const TABLE: &'static str = "tag";
    const KEY: &'static str = "tags";

    fn schema() -> EntitySchema {
        builtin::tag_schema()
    }
}

impl LabelKind for CategoryKind {
    const ENTITY: &'static str = "Category";
    const TABLE: &'static str = "category";
    const KEY: &'static str = "categories";

    fn schema() -> EntitySchema {
        builtin::category_schema()
    }
}

pub type Tag = Label<TagKind>;
pub type Category = Label<CategoryKind>;

/// A named label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Label<K: LabelKind> {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    _kind: PhantomData<K>,
}

/// Partial update for a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl<K: LabelKind> Label<K> {
    pub fn create(
        name: impl Into<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
            _kind: PhantomData,
        }
    }

    /// Rebuild a label from stored columns.
    pub fn restore(
        id: EntityId,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            created_at,
            updated_at,
            _kind: PhantomData,
        }
    }

    pub fn apply(&self, patch: LabelPatch, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        next.updated_at = now;
        next
    }

    pub fn entity() -> &'static str {
        K::ENTITY
    }

    pub fn not_found(id: &EntityId) -> DomainError {
        DomainError::NotFound {
            entity: K::ENTITY,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_carry_storage_facts() {
        assert_eq!(Tag::entity(), "Tag");
        assert_eq!(CategoryKind::TABLE, "category");
        assert_eq!(CategoryKind::KEY, "categories");
    }

    #[test]
    fn serializes_without_marker() {
        let tag = Tag::create("rust", None, Utc::now());
        let json = serde_json::to_value(&tag).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["createdAt", "description", "id", "name", "updatedAt"]
        );
        let back: Tag = serde_json::from_value(json).unwrap();
        assert_eq!(back, tag);
    }

    #[test]
    fn patch_refreshes_updated_at_only() {
        let created = Utc::now() - chrono::Duration::hours(1);
        let category = Category::create("Music", Some("Live shows".into()), created);
        let now = Utc::now();
        let renamed = category.apply(
            LabelPatch {
                name: Some("Concerts".into()),
                description: None,
            },
            now,
        );
        assert_eq!(renamed.name, "Concerts");
        assert_eq!(renamed.description.as_deref(), Some("Live shows"));
        assert_eq!(renamed.created_at, created);
        assert_eq!(renamed.updated_at, now);
    }

    #[test]
    fn not_found_names_the_kind() {
        let id = EntityId::parse("c9").unwrap();
        assert_eq!(Category::not_found(&id).to_string(), "Category not found: c9");
    }
}
