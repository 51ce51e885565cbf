//! # EventDesk server
//!
//! The `eventdesk` binary: an axum REST API over the SQLite adapters, plus
//! the commands that migrate the database and inspect configuration and the
//! admin registry.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod output;
