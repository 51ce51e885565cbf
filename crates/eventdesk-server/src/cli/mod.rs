//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "eventdesk",
    bin_name = "eventdesk",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f389} Schema-driven admin API for events, categories and tags",
    long_about = "EventDesk serves a REST API for events, categories, tags and users, \
                  backed by SQLite, and describes every entity to admin front ends \
                  through its entity registry.",
    after_help = "EXAMPLES:\n\
        \x20 eventdesk serve --port 8080\n\
        \x20 eventdesk migrate --database-url sqlite://eventdesk.db\n\
        \x20 eventdesk entities --format json\n\
        \x20 eventdesk completions bash > /usr/share/bash-completion/completions/eventdesk",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    #[command(
        visible_alias = "s",
        about = "Run the HTTP API",
        after_help = "EXAMPLES:\n\
            \x20 eventdesk serve\n\
            \x20 eventdesk serve --host 0.0.0.0 --port 8080\n\
            \x20 PORT=4000 eventdesk serve"
    )]
    Serve(ServeArgs),

    /// Create or update the database schema.
    #[command(
        about = "Create or update the database schema",
        after_help = "EXAMPLES:\n\
            \x20 eventdesk migrate\n\
            \x20 eventdesk migrate --database-url sqlite://data/eventdesk.db"
    )]
    Migrate(MigrateArgs),

    /// List registered admin entities.
    #[command(
        visible_alias = "ls",
        about = "List registered admin entities",
        after_help = "EXAMPLES:\n\
            \x20 eventdesk entities\n\
            \x20 eventdesk entities --format json"
    )]
    Entities(EntitiesArgs),

    /// Initialise an EventDesk configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 eventdesk init           # platform config location\n\
            \x20 eventdesk init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 eventdesk completions bash > ~/.local/share/bash-completion/completions/eventdesk\n\
            \x20 eventdesk completions zsh  > ~/.zfunc/_eventdesk\n\
            \x20 eventdesk completions fish > ~/.config/fish/completions/eventdesk.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 eventdesk config get server.port\n\
            \x20 eventdesk config list\n\
            \x20 eventdesk config path"
    )]
    Config(ConfigCommands),
}

// ── serve ─────────────────────────────────────────────────────────────────────

/// Arguments for `eventdesk serve`.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Interface to bind.
    #[arg(long = "host", value_name = "HOST", help = "Interface to bind")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    /// Database URL.
    #[arg(
        long = "database-url",
        value_name = "URL",
        help = "Database URL (sqlite://path or sqlite::memory:)"
    )]
    pub database_url: Option<String>,
}

// ── migrate ───────────────────────────────────────────────────────────────────

/// Arguments for `eventdesk migrate`.
#[derive(Debug, Clone, Default, Args)]
pub struct MigrateArgs {
    /// Database URL.
    #[arg(long = "database-url", value_name = "URL", help = "Database URL")]
    pub database_url: Option<String>,
}

// ── entities ──────────────────────────────────────────────────────────────────

/// Arguments for `eventdesk entities`.
#[derive(Debug, Clone, Args)]
pub struct EntitiesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: EntitiesFormat,
}

/// Output format for the `entities` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntitiesFormat {
    /// Human-readable table.
    Table,
    /// JSON array of registered entities.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `eventdesk init`.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `eventdesk completions`.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `eventdesk config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `server.port`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
