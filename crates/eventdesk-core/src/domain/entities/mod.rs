pub mod common;
pub mod event;
pub mod label;
pub mod user;

pub use crate::domain::DomainError;
pub use common::{EntityId, parse_datetime};
pub use event::{Event, EventPatch, EventRecord, NewEvent};
pub use label::{Category, CategoryKind, Label, LabelKind, LabelPatch, Tag, TagKind};
pub use user::User;
