//! The `Event` aggregate and its enriched read model.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and server layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, EntityId, Tag};
use crate::domain::error::{DomainError, FieldErrors};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A scheduled event.
///
/// Invariant: `end_date >= start_date`. Checked on creation and on the merged
/// result of every patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EntityId,
    pub name: String,
    pub image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
    pub category_id: Option<EntityId>,
    pub creator_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Already-coerced input for a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
    pub category_id: Option<EntityId>,
}

/// A partial update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub name: Option<String>,
    pub image: Option<Option<String>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<EntityId>>,
}

impl Event {
    /// Build a new event owned by `creator_id`.
    pub fn create(
        input: NewEvent,
        creator_id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let event = Self {
            id: EntityId::generate(),
            name: input.name,
            image: input.image,
            start_date: input.start_date,
            end_date: input.end_date,
            location: input.location,
            description: input.description,
            category_id: input.category_id,
            creator_id,
            created_at: now,
            updated_at: now,
        };
        event.validate()?;
        Ok(event)
    }

    /// Apply a patch, returning the merged event.
    ///
    /// `created_at` and `creator_id` never change; `updated_at` becomes `now`.
    pub fn apply(&self, patch: EventPatch, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(image) = patch.image {
            next.image = image;
        }
        if let Some(start) = patch.start_date {
            next.start_date = start;
        }
        if let Some(end) = patch.end_date {
            next.end_date = end;
        }
        if let Some(location) = patch.location {
            next.location = location;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(category_id) = patch.category_id {
            next.category_id = category_id;
        }
        next.updated_at = now;
        next.validate()?;
        Ok(next)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        if self.end_date < self.start_date {
            errors.add("endDate", "End date must not be before start date");
        }
        errors.into_result()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end_date - self.start_date
    }
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Read model ────────────────────────────────────────────────────────────────

/// An event together with its category and tags, as returned by every read
/// and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(flatten)]
    pub event: Event,
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl EventRecord {
    pub fn tag_ids(&self) -> Vec<&EntityId> {
        self.tags.iter().map(|t| &t.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, hour, 0, 0).unwrap()
    }

    fn launch() -> NewEvent {
        NewEvent {
            name: "Launch".into(),
            image: None,
            start_date: at(10),
            end_date: at(12),
            location: "Paris".into(),
            description: None,
            category_id: None,
        }
    }

    #[test]
    fn create_sets_timestamps_and_owner() {
        let creator = EntityId::parse("u1").unwrap();
        let event = Event::create(launch(), creator.clone(), at(8)).unwrap();
        assert_eq!(event.creator_id, creator);
        assert_eq!(event.created_at, event.updated_at);
        assert_eq!(event.duration(), chrono::Duration::hours(2));
    }

    #[test]
    fn create_rejects_inverted_range() {
        let mut input = launch();
        input.end_date = at(9);
        let err = Event::create(input, EntityId::parse("u1").unwrap(), at(8)).unwrap_err();
        match err {
            DomainError::Validation(errors) => assert!(errors.for_field("endDate").is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn patch_changes_only_supplied_fields() {
        let event = Event::create(launch(), EntityId::parse("u1").unwrap(), at(8)).unwrap();
        let patched = event
            .apply(
                EventPatch {
                    location: Some("Lyon".into()),
                    description: Some(Some("Doors at 9".into())),
                    ..Default::default()
                },
                at(9),
            )
            .unwrap();
        assert_eq!(patched.location, "Lyon");
        assert_eq!(patched.name, "Launch");
        assert_eq!(patched.created_at, at(8));
        assert_eq!(patched.updated_at, at(9));
    }

    #[test]
    fn patch_validates_merged_range() {
        let event = Event::create(launch(), EntityId::parse("u1").unwrap(), at(8)).unwrap();
        let result = event.apply(
            EventPatch {
                start_date: Some(at(13)),
                ..Default::default()
            },
            at(9),
        );
        assert!(result.is_err());
    }

    #[test]
    fn patch_can_clear_nullable_fields() {
        let mut input = launch();
        input.image = Some("cover.png".into());
        let event = Event::create(input, EntityId::parse("u1").unwrap(), at(8)).unwrap();
        let patched = event
            .apply(
                EventPatch {
                    image: Some(None),
                    ..Default::default()
                },
                at(9),
            )
            .unwrap();
        assert!(patched.image.is_none());
    }

    #[test]
    fn record_serializes_flat_with_camel_case() {
        let event = Event::create(launch(), EntityId::parse("u1").unwrap(), at(8)).unwrap();
        let record = EventRecord {
            event,
            category: None,
            tags: vec![],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Launch");
        assert!(json["startDate"].is_string());
        assert!(json["category"].is_null());
        assert_eq!(json["tags"].as_array().unwrap().len(), 0);
    }
}
