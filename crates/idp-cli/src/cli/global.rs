//! Flags accepted by every idp-lite subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more to stderr and add cause/suggestions to errors (-v, -vv, -vvv)
    ///
    /// -v logs the resolved template root and target, -vv every template
    /// entry as it is rendered or copied, -vvv everything. Failures print
    /// their cause chain and suggestions from -v on.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print only the command's result (e.g. the generated path)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colours; also set by NO_COLOR or `output.no_color`
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of the per-user config.toml
    ///
    /// A file named here must exist, except for `idp-lite init`, which
    /// creates it.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed [default: `output.format`, else auto]
    ///
    /// `auto` means `human` when stdout is a terminal and `plain` otherwise.
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    pub output_format: Option<OutputFormat>,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise
    #[default]
    Auto,
    /// Coloured success line plus a summary
    Human,
    /// One uncoloured result line
    Plain,
    /// Pretty-printed JSON report
    Json,
}

impl OutputFormat {
    /// Name as written in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Human => "human",
            Self::Plain => "plain",
            Self::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_value_names() {
        for format in OutputFormat::value_variants() {
            let name = format.to_possible_value().unwrap();
            assert_eq!(name.get_name(), format.as_str());
        }
    }

    #[test]
    fn config_spelling_round_trips() {
        let parsed: OutputFormat = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(parsed, OutputFormat::Plain);
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
    }
}
