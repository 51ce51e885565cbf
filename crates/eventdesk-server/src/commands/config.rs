//! `eventdesk config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{ServerError, ServerResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> ServerResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            output.data(&render_value(&value))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = toml::to_string_pretty(&config).map_err(|e| ServerError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.data(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

/// Scalars print bare; tables and arrays print as JSON.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_bare() {
        assert_eq!(render_value(&json!("sqlite://eventdesk.db")), "sqlite://eventdesk.db");
        assert_eq!(render_value(&json!(3000)), "3000");
        assert_eq!(render_value(&json!(null)), "");
    }

    #[test]
    fn sections_render_as_json() {
        let cfg = AppConfig::default();
        let server = cfg.get("server").unwrap();
        assert_eq!(render_value(&server), r#"{"host":"127.0.0.1","port":3000}"#);
    }
}
