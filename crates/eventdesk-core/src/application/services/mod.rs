pub mod event_service;
pub mod label_service;
pub mod user_service;

pub use event_service::EventService;
pub use label_service::{CategoryService, LabelService, TagService};
pub use user_service::UserService;
