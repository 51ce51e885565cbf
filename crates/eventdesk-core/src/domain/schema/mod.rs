//! Schemas: ordered field descriptors with validation and UI metadata.

pub mod builtin;
pub mod entity_schema;
pub mod field;

pub use entity_schema::{EntitySchema, NamedField};
pub use field::{
    DisplayRules, Field, FieldDescriptor, FieldMeta, FieldValidator, RelationMeta, Rule,
    ValueType,
};
