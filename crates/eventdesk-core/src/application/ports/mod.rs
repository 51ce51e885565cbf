//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `eventdesk-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `EventRepository`, `LabelRepository<K>`, `UserRepository`: storage
//!   - `SessionVerifier`: who is behind a request
//!   - `CrudService<T>`, `RelationSource`: the REST API seen from a client
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The HTTP controllers in `eventdesk-server` call services directly)

pub mod output;

pub use output::{
    EventRepository, LabelRepository, SessionVerifier, UserRepository,
    client::{
        CrudService, FilterValue, Filters, FormValues, ItemsPage, PageMeta, RelationSource,
        SelectOption,
    },
};
