//! Command-line surface of `idp-lite`: subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "idp-lite",
    bin_name = "idp-lite",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Golden-path service scaffolding CLI",
    long_about = "idp-lite materializes the golden-path service template \
                  (fastify, pino, OpenTelemetry, CI workflow) into a new \
                  directory, substituting the service name.",
    after_help = "EXAMPLES:\n\
        \x20 idp-lite create payments-api\n\
        \x20 idp-lite create payments-api --out ./services/payments\n\
        \x20 idp-lite create payments-api --dry-run\n\
        \x20 idp-lite completions bash > /usr/share/bash-completion/completions/idp-lite",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new service from the template.
    #[command(
        visible_alias = "c",
        about = "Create a new service",
        after_help = "EXAMPLES:\n\
            \x20 idp-lite create payments-api\n\
            \x20 idp-lite create orders --out /srv/orders --fresh\n\
            \x20 idp-lite create billing --template-dir ./my-template --dry-run"
    )]
    Create(CreateArgs),

    /// Initialise an idp-lite configuration file.
    #[command(
        about = "Write a default config.toml",
        after_help = "EXAMPLES:\n\
            \x20 idp-lite init           # default location\n\
            \x20 idp-lite init --force   # overwrite an existing file\n\
            \x20 idp-lite -c ./idp.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Print a shell completion script",
        after_help = "EXAMPLES:\n\
            \x20 idp-lite completions bash > ~/.local/share/bash-completion/completions/idp-lite\n\
            \x20 idp-lite completions zsh  > ~/.zfunc/_idp-lite\n\
            \x20 idp-lite completions fish > ~/.config/fish/completions/idp-lite.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the idp-lite configuration.
    #[command(
        about = "Show the effective configuration",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 idp-lite config get templates.root\n\
            \x20 idp-lite config list\n\
            \x20 idp-lite config path"
    )]
    Config(ConfigCommands),
}

/// Arguments for `idp-lite create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Kebab-case service name, e.g. `payments-api`.
    #[arg(value_name = "SERVICE_NAME", help = "Service name (kebab-case)")]
    pub name: String,

    /// Output directory.  Defaults to `./<SERVICE_NAME>`.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "PATH",
        help = "Output directory (default: ./<SERVICE_NAME>)"
    )]
    pub out: Option<PathBuf>,

    /// Template directory to generate from instead of the built-in one.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Template directory (overrides config and built-in template)"
    )]
    pub template_dir: Option<PathBuf>,

    /// Print the planned operations without writing anything.
    #[arg(long = "dry-run", help = "Show what would be generated")]
    pub dry_run: bool,

    /// Refuse to reuse an existing (even empty) output directory.
    #[arg(long = "fresh", help = "Fail if the output directory already exists")]
    pub fresh: bool,
}

/// Arguments for `idp-lite init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Replace a config file that is already there
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `idp-lite completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Subcommands for `idp-lite config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value, e.g. `templates.root`
    Get {
        /// Dotted key path, e.g. `templates.root`.
        key: String,
    },
    /// Print every value as TOML
    List,
    /// Print where the config file is read from
    Path,
}
