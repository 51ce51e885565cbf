//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`). Without it the configured `logging.level` applies.
    /// Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - logging.level from the configuration (default: info)
    -v      - Info level
    -vv     - Debug level (SQL and request details)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Only errors and machine-readable data reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Plain output. Also set by `NO_COLOR` and implied when stdout is not a
    /// terminal.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file layered over the defaults. Must exist when given.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}
