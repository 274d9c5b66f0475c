//! `idp-lite config`: inspect configuration values.

use std::path::Path;

use crate::{cli::ConfigCommands, config::AppConfig, error::CliResult, output::OutputManager};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` path, if one was given.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            output.result(&value)?;
        }
        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.result(config.to_toml()?.trim_end())?;
        }
        ConfigCommands::Path => {
            let path = config_file
                .map(Path::to_path_buf)
                .unwrap_or_else(AppConfig::config_path);
            output.result(&path.display().to_string())?;
        }
    }
    Ok(())
}
