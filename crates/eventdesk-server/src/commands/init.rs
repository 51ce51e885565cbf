//! `eventdesk init`: write a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{IntoServer, ServerError, ServerResult},
    output::OutputManager,
};

/// Writes to `--config` when given, otherwise the platform path.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> ServerResult<()> {
    let path = global.config.unwrap_or_else(AppConfig::config_path);
    let written = write_default(&path, args.force)?;
    output.success(&format!("Configuration created at {}", written.display()))?;
    Ok(())
}

/// Serialise `AppConfig::default()` to `path`.
pub fn write_default(path: &std::path::Path, force: bool) -> ServerResult<PathBuf> {
    if path.exists() && !force {
        return Err(ServerError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| ServerError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_server_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_server_context(|| format!("Failed to write config to '{}'", path.display()))?;

    Ok(path.to_path_buf())
}
