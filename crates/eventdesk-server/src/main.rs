//! # EventDesk
//!
//! ## Startup sequence
//!
//! 1. Load `.env` and parse CLI arguments.
//! 2. Load configuration (defaults + file + env).
//! 3. Initialise the tracing subscriber from flags and `[logging]`.
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the command handler.
//! 6. Translate any [`ServerError`] into a message and an exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use eventdesk_server::{
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    error::{ServerError, ServerResult},
    logging::init_logging,
    output::OutputManager,
};

fn main() -> ExitCode {
    // Missing .env is fine; deployments use real variables.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here.
            let _ = e.print();
            return ExitCode::from(e.exit_code() as u8);
        }
    };
    let verbose = cli.global.verbose > 0;

    // ── 2. Load configuration ─────────────────────────────────────────────
    // `init` rewrites the file, so it must not depend on reading it.
    let loaded = match cli.command {
        Commands::Init(_) => Ok(AppConfig::default()),
        _ => AppConfig::load(cli.global.config.as_ref()),
    };
    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose),
    };

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> ServerResult<()> {
    match cli.command {
        Commands::Serve(cmd) => commands::serve::execute(cmd, config, output),
        Commands::Migrate(cmd) => commands::migrate::execute(cmd, config, output),
        Commands::Entities(cmd) => commands::entities::execute(cmd, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// The single place where structured errors become stderr output and an
/// exit code.
fn handle_error(err: ServerError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}
