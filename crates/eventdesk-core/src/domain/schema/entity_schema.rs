//! Ordered object schemas built from field descriptors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::field::{FieldDescriptor, type_name};
use crate::domain::error::{DomainError, FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
}

/// An object schema: named fields in declaration order.
///
/// Unknown keys in validated payloads are ignored, so a client may send a
/// whole record back (`id`, `createdAt`, ...) on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub entity: String,
    pub fields: Vec<NamedField>,
}

impl EntitySchema {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. A repeated name replaces the earlier descriptor in
    /// place.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.descriptor = descriptor,
            None => self.fields.push(NamedField { name, descriptor }),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|f| (f.name.as_str(), &f.descriptor))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy without the named fields.
    pub fn omit(&self, names: &[&str]) -> Self {
        Self {
            entity: self.entity.clone(),
            fields: self
                .fields
                .iter()
                .filter(|f| !names.contains(&f.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Copy keeping only the named fields, in schema order.
    pub fn pick(&self, names: &[&str]) -> Self {
        Self {
            entity: self.entity.clone(),
            fields: self
                .fields
                .iter()
                .filter(|f| names.contains(&f.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Copy with every field optional.
    pub fn partial(&self) -> Self {
        let mut schema = self.clone();
        for field in &mut schema.fields {
            field.descriptor.validator.optional = true;
        }
        schema
    }

    /// Validate a payload, collecting every failure.
    pub fn validate(&self, value: &Value) -> Result<(), FieldErrors> {
        let Some(object) = value.as_object() else {
            return Err(FieldErrors::form(format!(
                "Expected object, received {}",
                type_name(value)
            )));
        };

        let mut errors = FieldErrors::new();
        for field in &self.fields {
            for message in field.descriptor.check(object.get(&field.name)) {
                errors.add(field.name.clone(), message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, then deserialize into a typed request.
    pub fn parse<T: DeserializeOwned>(&self, value: &Value) -> Result<T, DomainError> {
        self.validate(value).map_err(DomainError::Validation)?;
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::Validation(FieldErrors::form(e.to_string())))
    }
}
