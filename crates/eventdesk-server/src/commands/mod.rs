//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod entities;
pub mod init;
pub mod migrate;
pub mod serve;

use crate::error::{ServerError, ServerResult};

/// Single-use runtime for the async commands.
pub(crate) fn runtime() -> ServerResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ServerError::IoError {
            message: "Failed to start the async runtime".into(),
            source: e,
        })
}
