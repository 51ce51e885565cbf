//! EventDesk Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for EventDesk, a
//! schema-driven admin and CRUD backend for events, categories and tags.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      eventdesk-server (HTTP + CLI)      │
//! │    (Controllers, config, logging)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (EventService, LabelService<K>, ...)   │
//! │  (FormPlan, ListScaffold, FormScaffold) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Repositories, SessionVerifier, Crud)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   eventdesk-adapters (Infrastructure)   │
//! │  (SQLite repositories, REST client)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Event, Label<K>, EntitySchema, admin   │
//! │  registry)  No I/O, no tracing          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eventdesk_core::prelude::*;
//!
//! let registry = builtin_registry().unwrap();
//! let events = registry.get("events").unwrap();
//! let plan = FormPlan::build(&events.config, FormMode::Create, None);
//! assert_eq!(plan.rows[0], vec!["name".to_string()]);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CategoryService, Credentials, CrudService, Envelope, EventService,
        ListEnvelope, RawListParams, SessionUser, TagService, UserService,
        admin::{FormMode, FormPlan, FormScaffold, ListQuery, ListScaffold},
        dto::{CreateEvent, CreateLabel, UpdateEvent, UpdateLabel},
        ports::{EventRepository, LabelRepository, SessionVerifier, UserRepository},
    };
    pub use crate::domain::{
        AdminEntityConfig, AdminRegistry, Category, CategoryKind, DomainError, EntityId,
        EntitySchema, Event, EventRecord, Field, FieldErrors, Label, LabelKind, Tag, TagKind,
        User, builtin_registry,
    };
    pub use crate::error::{DeskError, DeskResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
