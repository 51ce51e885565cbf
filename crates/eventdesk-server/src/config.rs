//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! server crate owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the commands, not here)
//! 2. `PORT`, `DATABASE_URL` and `AUTH_URL`
//! 3. `EVENTDESK__SECTION__KEY` environment variables
//! 4. Config file (`--config`, or the platform config path when it exists)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use eventdesk_core::prelude::{EntityId, SessionUser};

use crate::error::{ServerError, ServerResult};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Where sessions are verified.
///
/// With `url` set, the auth service at that address is asked about every
/// protected request. Without it, only the static `tokens` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub url: Option<String>,
    pub tokens: Vec<StaticToken>,
}

/// A fixed bearer token and the user it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticToken {
    pub token: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter level used when neither `RUST_LOG` nor `-v` is given.
    pub level: String,
    pub format: LogFormat,
    /// Also write logs to this file (daily rotation).
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://eventdesk.db".into(),
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
            file: None,
        }
    }
}

impl StaticToken {
    /// The session user this token authenticates as.
    pub fn session_user(&self) -> ServerResult<SessionUser> {
        let id = EntityId::parse(self.user_id.as_str()).map_err(|e| ServerError::ConfigError {
            message: format!("auth.tokens: invalid user_id '{}'", self.user_id),
            source: Some(Box::new(e)),
        })?;
        Ok(SessionUser {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            email_verified: false,
            image: None,
            role: self.role.clone(),
        })
    }
}

/// Well-known variables and the keys they override.
const WELL_KNOWN: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("AUTH_URL", "auth.url"),
];

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it the platform config file is used if present.
    pub fn load(config_file: Option<&PathBuf>) -> ServerResult<Self> {
        let env: config::Map<String, String> = std::env::vars().collect();
        match config_file {
            Some(path) => Self::load_from(Some(path.as_path()), true, env),
            None => Self::load_from(Some(Self::config_path().as_path()), false, env),
        }
    }

    /// Load with an explicit file and environment map.
    pub fn load_from(
        file: Option<&Path>,
        required: bool,
        env: config::Map<String, String>,
    ) -> ServerResult<Self> {
        let defaults = Config::try_from(&AppConfig::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = file {
            if required && !path.exists() {
                return Err(ServerError::ConfigError {
                    message: format!("Config file not found: {}", path.display()),
                    source: None,
                });
            }
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("EVENTDESK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        for (var, key) in WELL_KNOWN {
            if let Some(value) = env.get(*var).filter(|v| !v.is_empty()) {
                builder = builder
                    .set_override(*key, value.as_str())
                    .map_err(config_error)?;
            }
        }

        builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.eventdesk.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "eventdesk", "eventdesk")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".eventdesk.toml"))
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Look up a dotted key such as `server.port`.
    pub fn get(&self, key: &str) -> ServerResult<serde_json::Value> {
        let root = serde_json::to_value(self).map_err(|e| ServerError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;
        key.split('.')
            .try_fold(&root, |node, part| node.get(part))
            .cloned()
            .ok_or_else(|| ServerError::UnknownConfigKey { key: key.into() })
    }
}

fn config_error(e: config::ConfigError) -> ServerError {
    ServerError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let cfg = AppConfig::load_from(None, false, env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn well_known_variables_override() {
        let cfg = AppConfig::load_from(
            None,
            false,
            env(&[
                ("PORT", "4000"),
                ("DATABASE_URL", "sqlite::memory:"),
                ("AUTH_URL", "http://auth.local"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.auth.url.as_deref(), Some("http://auth.local"));
    }

    #[test]
    fn prefixed_variables_override() {
        let cfg = AppConfig::load_from(
            None,
            false,
            env(&[("EVENTDESK__LOGGING__LEVEL", "debug")]),
        )
        .unwrap();
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn file_values_layer_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[[auth.tokens]]
token = "dev"
user_id = "u1"
name = "Dev"
email = "dev@example.com"
"#
        )
        .unwrap();

        let cfg = AppConfig::load_from(Some(file.path()), true, env(&[("PORT", "9090")])).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.auth.tokens.len(), 1);
        assert_eq!(cfg.auth.tokens[0].email, "dev@example.com");
    }

    #[test]
    fn missing_required_file_is_config_error() {
        let err = AppConfig::load_from(
            Some(Path::new("/definitely/not/here.toml")),
            true,
            env(&[]),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("server.port").unwrap(), 3000);
        assert_eq!(cfg.get("logging.format").unwrap(), "compact");
        assert!(matches!(
            cfg.get("server.nope"),
            Err(ServerError::UnknownConfigKey { .. })
        ));
    }
}
