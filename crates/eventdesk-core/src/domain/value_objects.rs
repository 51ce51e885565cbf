//! Domain value objects: field kinds, layouts, widgets, cardinality, sorting.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers. The string forms are the
//! wire forms used by admin descriptors and list query parameters.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Done; serde follows `as_str` through the rename attributes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── FieldKind ────────────────────────────────────────────────────────────────

/// How a field is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Textarea,
    Date,
    Relation,
    Image,
}

impl FieldKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Relation => "relation",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "textarea" => Ok(Self::Textarea),
            "date" | "datetime" => Ok(Self::Date),
            "relation" => Ok(Self::Relation),
            "image" => Ok(Self::Image),
            other => Err(DomainError::field("type", format!("unknown field kind: {other}"))),
        }
    }
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Width of a field inside the two-column form grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Full,
    Half,
    #[default]
    Auto,
}

impl Layout {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "half" => Ok(Self::Half),
            "auto" => Ok(Self::Auto),
            other => Err(DomainError::field("layout", format!("unknown layout: {other}"))),
        }
    }
}

// ── Widget ───────────────────────────────────────────────────────────────────

/// Input control hint for the form renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Input,
    Textarea,
    DatePicker,
    Select,
    Tag,
    Upload,
}

impl Widget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::DatePicker => "datepicker",
            Self::Select => "select",
            Self::Tag => "tag",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Cardinality ──────────────────────────────────────────────────────────────

/// Whether a relation field references one record or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Single,
    Multiple,
}

impl Cardinality {
    pub const fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

// ── Sorting ──────────────────────────────────────────────────────────────────

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SQL keyword for this direction.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(DomainError::field(
                "sortOrder",
                format!("expected 'asc' or 'desc', got '{other}'"),
            )),
        }
    }
}

/// A sortable column. Which fields a collection accepts is decided by its
/// service; parsing only checks the name is known at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    CreatedAt,
    StartDate,
}

impl SortField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "createdAt",
            Self::StartDate => "startDate",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "startDate" | "start_date" => Ok(Self::StartDate),
            other => Err(DomainError::field(
                "sortBy",
                format!("cannot sort by '{other}'"),
            )),
        }
    }
}
