//! Route handlers, one module per collection.

pub mod admin;
pub mod events;
pub mod health;
pub mod labels;
pub mod users;
