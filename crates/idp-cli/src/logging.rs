//! Diagnostics on stderr through `tracing-subscriber`.
//!
//! Stdout carries only command results (`Service generated at ...`), so every
//! log line goes to stderr. The three workspace crates share one level picked
//! from `-q`/`-v`; other crates stay silent unless `RUST_LOG` says otherwise.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::cli::GlobalArgs;

/// Log targets of the crates that make up idp-lite.
const WORKSPACE_TARGETS: [&str; 3] = ["idp_lite", "idp_core", "idp_adapters"];

/// Install the stderr subscriber for this process.
///
/// `RUST_LOG`, when set and valid, replaces the flag-derived filter.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(workspace_directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        // Targets only help once per-entry debug events show up.
        .with_target(level >= LevelFilter::DEBUG)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

/// `-q` forces errors only; otherwise each `-v` lowers the threshold by one.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    [
        LevelFilter::WARN,
        LevelFilter::INFO,
        LevelFilter::DEBUG,
        LevelFilter::TRACE,
    ][usize::from(args.verbose.min(3))]
}

/// `idp_lite=<level>,idp_core=<level>,idp_adapters=<level>`.
fn workspace_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn verbosity_table() {
        let cases = [
            (0, false, LevelFilter::WARN),
            (1, false, LevelFilter::INFO),
            (2, false, LevelFilter::DEBUG),
            (3, false, LevelFilter::TRACE),
            (9, false, LevelFilter::TRACE),
            (0, true, LevelFilter::ERROR),
            (2, true, LevelFilter::ERROR),
        ];
        for (verbose, quiet, expected) in cases {
            assert_eq!(
                level_for(&args(verbose, quiet)),
                expected,
                "verbose={verbose} quiet={quiet}"
            );
        }
    }

    #[test]
    fn directives_cover_every_workspace_crate() {
        let directives = workspace_directives(LevelFilter::DEBUG);
        assert_eq!(
            directives,
            "idp_lite=debug,idp_core=debug,idp_adapters=debug"
        );
    }

    #[test]
    fn directives_parse_as_env_filter() {
        for level in [LevelFilter::ERROR, LevelFilter::WARN, LevelFilter::TRACE] {
            assert!(EnvFilter::try_new(workspace_directives(level)).is_ok());
        }
    }
}
