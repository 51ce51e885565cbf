//! The REST API from the client side.
//!
//! `ApiService<T>` speaks the response envelope for one collection.
//! `ServiceDirectory` hands out services by admin registry key and loads
//! relation options through them.

mod api_service;
mod directory;

pub use api_service::ApiService;
pub use directory::ServiceDirectory;
