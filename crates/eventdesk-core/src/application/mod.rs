//! Application layer for EventDesk.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (EventService, LabelService, UserService)
//! - **Ports**: Interface definitions (traits) for storage, sessions and the REST client
//! - **Admin**: Form planning and page scaffolds driven by the admin registry
//! - **Envelopes, DTOs, pagination**: Request and response shapes
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. All rules live in `crate::domain`.

pub mod admin;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod session;

pub use services::{CategoryService, EventService, LabelService, TagService, UserService};

pub use ports::{
    CrudService, EventRepository, LabelRepository, RelationSource, SessionVerifier,
    UserRepository,
};

pub use envelope::{Envelope, ErrorBody, ListEnvelope};
pub use error::ApplicationError;
pub use pagination::{ListParams, ListPolicy, Page, RawListParams};
pub use session::{Credentials, SessionUser};
