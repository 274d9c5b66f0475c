//! `idp-lite`: materialize the golden-path service template.
//!
//! Results go to stdout, diagnostics and the `Error:` line to stderr. Exit
//! status is 0 on success, 2 for a bad name, target or usage, 1 for
//! filesystem failures, 3 for an unknown config key and 4 for a broken
//! config file.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // `--help` and `--version` also arrive here, printed to stdout.
        Err(usage) => {
            let _ = usage.print();
            return ExitCode::from(if usage.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    let colour = !cli.global.no_color && std::io::stderr().is_terminal();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, verbose, colour),
    }
}

/// `completions` and `init` run on defaults; the rest load the layered config.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let Cli { global, command } = cli;
    debug!(verbose = global.verbose, quiet = global.quiet, "dispatching");

    match command {
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Init(args) => {
            let output = OutputManager::new(&global, &AppConfig::default());
            commands::init::execute(args, global.config.as_deref(), output)
        }
        Commands::Create(args) => {
            let (config, output) = configured(&global)?;
            commands::create::execute(args, config, output)
        }
        Commands::Config(cmd) => {
            let (config, output) = configured(&global)?;
            commands::config::execute(cmd, global.config.as_deref(), config, output)
        }
    }
}

fn configured(global: &GlobalArgs) -> CliResult<(AppConfig, OutputManager)> {
    let config = AppConfig::load(global.config.as_deref())?;
    let output = OutputManager::new(global, &config);
    Ok((config, output))
}

fn report(err: &CliError, verbose: bool, colour: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, colour));
    ExitCode::from(err.exit_code())
}
