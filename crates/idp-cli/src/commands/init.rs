//! `idp-lite init`: create a default configuration file.

use std::path::Path;

use tracing::info;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliResult, IoContext},
    output::OutputManager,
};

/// Write the default configuration to `config_file` (or the default path).
///
/// Runs before configuration is loaded, so `--config` may name a file that
/// does not exist yet.
pub fn execute(args: InitArgs, config_file: Option<&Path>, output: OutputManager) -> CliResult<()> {
    let config_path = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default().to_toml()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).at_path("create config directory", parent)?;
    }

    std::fs::write(&config_path, &toml).at_path("write config", &config_path)?;

    info!(path = %config_path.display(), "configuration written");
    output.success(&format!("Config written to {}", config_path.display()))?;
    Ok(())
}
