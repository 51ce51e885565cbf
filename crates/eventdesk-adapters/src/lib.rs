//! Infrastructure adapters for EventDesk.
//!
//! This crate implements the ports defined in `eventdesk-core::application::ports`.
//! It contains all external dependencies and I/O operations:
//!
//! - `sqlite`: the storage ports on a SQLite pool (sqlx)
//! - `http_client`: `CrudService<T>` and `RelationSource` over the REST API (reqwest)
//! - `session`: `SessionVerifier` against the auth service, or a fixed token table

pub mod http_client;
pub mod session;
pub mod sqlite;

// Re-export commonly used adapters
pub use http_client::{ApiService, ServiceDirectory};
pub use session::{RemoteSessionVerifier, StaticSessionVerifier};
pub use sqlite::{
    SqliteCategoryRepository, SqliteEventRepository, SqliteLabelRepository, SqliteTagRepository,
    SqliteUserRepository,
};
