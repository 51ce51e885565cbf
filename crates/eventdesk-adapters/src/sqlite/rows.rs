// Row shapes as stored, and their conversion into domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use eventdesk_core::domain::{EntityId, Event, Label, LabelKind, User};
use eventdesk_core::error::{DeskError, DeskResult};

/// Stored ids were validated on the way in; a bad one means the file was
/// edited behind our back.
fn stored_id(raw: String) -> DeskResult<EntityId> {
    EntityId::parse(raw).map_err(|e| DeskError::internal(format!("corrupt row: {e}")))
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct EventRow {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRow {
    pub fn into_event(self) -> DeskResult<Event> {
        Ok(Event {
            id: stored_id(self.id)?,
            name: self.name,
            image: self.image,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            description: self.description,
            category_id: self.category_id.map(stored_id).transpose()?,
            creator_id: stored_id(self.creator_id)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct LabelRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LabelRow {
    pub fn into_label<K: LabelKind>(self) -> DeskResult<Label<K>> {
        Ok(Label::restore(
            stored_id(self.id)?,
            self.name,
            self.description,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// A tag joined through `event_tag`.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct EventTagRow {
    pub event_id: String,
    #[sqlx(flatten)]
    pub tag: LabelRow,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> DeskResult<User> {
        Ok(User {
            id: stored_id(self.id)?,
            name: self.name,
            email: self.email,
            email_verified: self.email_verified,
            image: self.image,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub(crate) const EVENT_COLUMNS: &str = "id, name, image, start_date, end_date, location, \
     description, category_id, creator_id, created_at, updated_at";

pub(crate) const LABEL_COLUMNS: &str = "id, name, description, created_at, updated_at";

pub(crate) const USER_COLUMNS: &str =
    "id, name, email, email_verified, image, role, created_at, updated_at";
