//! Tracing subscriber initialisation.
//!
//! Only this crate is allowed to call [`init_logging`]; `eventdesk-core`
//! and `eventdesk-adapters` only *emit* spans and events.
//!
//! # Level resolution
//!
//! | Input                  | Filter level           |
//! |------------------------|------------------------|
//! | `RUST_LOG` set         | `RUST_LOG` as given    |
//! | `--quiet`              | ERROR                  |
//! | `-v` / `-vv` / `-vvv`  | INFO / DEBUG / TRACE   |
//! | otherwise              | `logging.level`        |

use std::io::IsTerminal as _;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;
use crate::config::{LogFormat, LoggingConfig};

/// Crates whose events are shown at the chosen level. Everything else
/// (hyper, sqlx internals) stays at WARN.
const OWN_TARGETS: &[&str] = &[
    "eventdesk",
    "eventdesk_server",
    "eventdesk_core",
    "eventdesk_adapters",
    "tower_http",
];

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire. The
/// returned guard flushes the log file on drop and must be held until exit.
pub fn init_logging(
    args: &GlobalArgs,
    config: &LoggingConfig,
) -> anyhow::Result<Option<WorkerGuard>> {
    let level = derive_level(args, config);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(level)))?;

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let stderr_layer = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                anyhow::anyhow!("log file path has no file name: {}", path.display())
            })?;
            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(guard)
}

/// Translate the verbosity counter, quiet flag and configured level.
fn derive_level<'a>(args: &GlobalArgs, config: &'a LoggingConfig) -> &'a str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => config.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter_directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}
