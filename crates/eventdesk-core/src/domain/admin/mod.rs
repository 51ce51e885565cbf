//! Admin entity configuration and registry.

pub mod builtin;
pub mod config;
pub mod registry;

pub use builtin::builtin_registry;
pub use config::{
    Actions, AdminEntityConfig, AdminEntityConfigBuilder, FieldOverride, HasEndpoint, NoEndpoint,
};
pub use registry::{AdminRegistry, AdminRegistryBuilder, DEFAULT_ORDER, MenuItem, RegisteredEntity};
