// ============================================================================
// domain/error.rs - DOMAIN ERRORS AND FIELD ERROR MAPS
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through services and into HTTP responses)
/// - Categorizable (for status codes and CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid admin configuration for '{entity}': {reason}")]
    InvalidAdminConfig { entity: String, reason: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("No admin entity registered under '{0}'")]
    UnknownEntity(String),
}

impl DomainError {
    /// Shorthand for a validation error on a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors
                .field_errors
                .iter()
                .filter_map(|(field, messages)| {
                    messages.first().map(|m| format!("{field}: {m}"))
                })
                .chain(errors.form_errors.iter().cloned())
                .collect(),
            Self::InvalidId(id) => vec![
                format!("'{id}' is not a usable identifier"),
                "Identifiers are non-empty text of at most 255 characters".into(),
            ],
            Self::NotFound { entity, .. } => vec![
                format!("The {entity} may have been deleted"),
                "List the collection to find a valid identifier".into(),
            ],
            Self::UnknownEntity(key) => vec![
                format!("'{key}' is not a registered admin entity"),
                "Try: eventdesk entities".into(),
            ],
            Self::InvalidAdminConfig { .. } => {
                vec!["Check the entity's form fields and overrides against its schema".into()]
            }
        }
    }

    /// Error category for status codes and CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::InvalidId(_) => ErrorCategory::Validation,
            Self::NotFound { .. } | Self::UnknownEntity(_) => ErrorCategory::NotFound,
            Self::InvalidAdminConfig { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

// ── Field error map ──────────────────────────────────────────────────────────

/// Flattened validation errors.
///
/// Serializes as `{"formErrors": [...], "fieldErrors": {"name": [...]}}`.
/// Form errors concern the payload as a whole (e.g. "expected an object");
/// field errors are keyed by field name and keep every failing rule in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(default)]
    pub form_errors: Vec<String>,
    #[serde(default)]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    /// Fold another error map into this one.
    pub fn merge(&mut self, other: FieldErrors) {
        self.form_errors.extend(other.form_errors);
        for (field, messages) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&[String]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    /// The first message of every failing field, for inline display.
    pub fn first_per_field(&self) -> BTreeMap<String, String> {
        self.field_errors
            .iter()
            .filter_map(|(field, messages)| {
                messages.first().map(|m| (field.clone(), m.clone()))
            })
            .collect()
    }

    /// `Ok(())` when empty, otherwise the map wrapped in a domain error.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        parts.extend(
            self.field_errors
                .iter()
                .map(|(field, messages)| format!("{field}: {}", messages.join(", "))),
        );
        if parts.is_empty() {
            f.write_str("no errors")
        } else {
            f.write_str(&parts.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flattened_shape() {
        let mut errors = FieldErrors::form("Expected an object");
        errors.add("name", "Required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["formErrors"][0], "Expected an object");
        assert_eq!(json["fieldErrors"]["name"][0], "Required");
    }

    #[test]
    fn first_per_field_keeps_declaration_order() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Too short");
        errors.add("name", "Must not contain digits");
        errors.add("location", "Required");
        let first = errors.first_per_field();
        assert_eq!(first["name"], "Too short");
        assert_eq!(first["location"], "Required");
    }

    #[test]
    fn merge_appends_messages() {
        let mut a = FieldErrors::single("endDate", "Invalid date");
        a.merge(FieldErrors::single("endDate", "Must not precede startDate"));
        assert_eq!(a.for_field("endDate").unwrap().len(), 2);
    }

    #[test]
    fn empty_map_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("x", "y").into_result().is_err());
    }

    #[test]
    fn categories() {
        assert_eq!(
            DomainError::field("name", "Required").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            DomainError::NotFound {
                entity: "Event",
                id: "x".into()
            }
            .category(),
            ErrorCategory::NotFound
        );
    }
}
