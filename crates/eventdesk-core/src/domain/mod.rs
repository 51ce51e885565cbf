// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for EventDesk.
//!
//! This module contains pure business logic: entities, schemas and the admin
//! registry. All I/O is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No database, network, or clock reads (callers pass `now`)
//! - **No tracing**: Observability belongs to the outer layers
//! - **Immutable entities**: Updates return new values via `apply`

pub mod admin;
pub mod entities;
pub mod error;
pub mod schema;
pub mod value_objects;

mod validation;

pub use admin::{
    Actions, AdminEntityConfig, AdminRegistry, FieldOverride, MenuItem, RegisteredEntity,
    builtin_registry,
};
pub use entities::{
    Category, CategoryKind, EntityId, Event, EventPatch, EventRecord, Label, LabelKind,
    LabelPatch, NewEvent, Tag, TagKind, User, parse_datetime,
};
pub use error::{DomainError, ErrorCategory, FieldErrors};
pub use schema::{EntitySchema, Field, FieldDescriptor, FieldMeta};
pub use value_objects::{Cardinality, FieldKind, Layout, SortField, SortOrder, Widget};

pub use validation::DomainValidator;
