//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `eventdesk-adapters` crate provides implementations.

pub mod client;

use async_trait::async_trait;

use crate::application::{
    pagination::{ListParams, Page},
    session::{Credentials, SessionUser},
};
use crate::domain::{EntityId, Event, EventRecord, Label, LabelKind, User};
use crate::error::DeskResult;

/// Port for event storage.
///
/// Implemented by:
/// - `eventdesk_adapters::sqlite::SqliteEventRepository`
///
/// ## Design Notes
///
/// - Reads always return the enriched `EventRecord`
/// - `insert` and `update` write the event row and its tag associations
///   atomically; `update` with `tag_ids: None` leaves associations alone
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self, params: &ListParams) -> DeskResult<Page<EventRecord>>;

    async fn find_by_id(&self, id: &EntityId) -> DeskResult<Option<EventRecord>>;

    async fn insert(&self, event: &Event, tag_ids: &[EntityId]) -> DeskResult<()>;

    /// Returns `false` when no such event exists.
    async fn update(&self, event: &Event, tag_ids: Option<Vec<EntityId>>) -> DeskResult<bool>;

    /// Returns `false` when no such event exists.
    async fn delete(&self, id: &EntityId) -> DeskResult<bool>;
}

/// Port for tag and category storage, one implementation per kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelRepository<K: LabelKind>: Send + Sync {
    async fn list(&self, params: &ListParams) -> DeskResult<Page<Label<K>>>;

    async fn find_by_id(&self, id: &EntityId) -> DeskResult<Option<Label<K>>>;

    /// Labels among `ids` that exist, in no particular order.
    async fn find_many(&self, ids: &[EntityId]) -> DeskResult<Vec<Label<K>>>;

    async fn insert(&self, label: &Label<K>) -> DeskResult<()>;

    async fn update(&self, label: &Label<K>) -> DeskResult<bool>;

    async fn delete(&self, id: &EntityId) -> DeskResult<bool>;
}

/// Port for the local user mirror.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert, or refresh name/email/image/role of an existing row. The
    /// stored `created_at` is kept.
    async fn upsert(&self, user: &User) -> DeskResult<()>;

    async fn find_by_id(&self, id: &EntityId) -> DeskResult<Option<User>>;

    async fn list(&self, params: &ListParams) -> DeskResult<Page<User>>;
}

/// Port for session verification.
///
/// Implemented by:
/// - `eventdesk_adapters::session::RemoteSessionVerifier` (auth service)
/// - `eventdesk_adapters::session::StaticSessionVerifier` (fixed tokens)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// `Ok(None)` when the credentials do not identify a live session.
    async fn verify(&self, credentials: &Credentials) -> DeskResult<Option<SessionUser>>;
}
