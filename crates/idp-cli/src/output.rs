//! Stdout rendering for command results.
//!
//! Two kinds of lines exist. Results (`result`, `success`, `json`) are the
//! command's answer and survive `--quiet`; commentary (`print`, `info`,
//! `warning`, `header`) is dropped by it. Colour is applied only in the
//! `human` format.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` beats `output.format`; `auto` becomes `human` on a
    /// terminal and `plain` elsewhere.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format.unwrap_or(config.output.format) {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            chosen => chosen,
        };
        let no_color = args.no_color || config.output.no_color || format != OutputFormat::Human;

        Self {
            format,
            quiet: args.quiet,
            no_color,
            term: Term::stdout(),
        }
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn result(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        let line = self.paint(msg, |m| m.green().bold().to_string());
        self.term.write_line(&line)
    }

    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        self.term.write_line(&serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.commentary(msg.to_owned())
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.commentary(self.paint(text, |t| t.cyan().bold().to_string()))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.commentary(self.marked('\u{2139}', msg, |t| t.blue().to_string()))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.commentary(self.marked('\u{26a0}', msg, |t| t.yellow().to_string()))
    }

    fn commentary(&self, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line)
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            style(text)
        }
    }

    /// `<mark> <msg>`, mark in bold when coloured.
    fn marked(&self, mark: char, msg: &str, style: impl Fn(&str) -> String) -> String {
        let mark = self.paint(&mark.to_string(), |m| style(m).bold().to_string());
        let msg = self.paint(msg, style);
        format!("{mark} {msg}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            no_color,
            output_format: Some(format),
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn commentary_dropped_when_quiet_results_kept() {
        let args = GlobalArgs {
            quiet: true,
            output_format: Some(OutputFormat::Plain),
            ..GlobalArgs::default()
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert!(out.print("skipped").is_ok());
        assert!(out.result("Service generated at /tmp/x").is_ok());
    }

    #[test]
    fn colour_only_in_human_format_without_no_color() {
        assert!(!manager(OutputFormat::Human, false).no_color);
        assert!(manager(OutputFormat::Human, true).no_color);
        assert!(manager(OutputFormat::Plain, false).no_color);
        assert!(manager(OutputFormat::Json, false).no_color);
    }

    #[test]
    fn config_no_color_applies() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            output_format: Some(OutputFormat::Human),
            ..GlobalArgs::default()
        };
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn uncoloured_marked_line() {
        let out = manager(OutputFormat::Plain, true);
        assert_eq!(
            out.marked('\u{26a0}', "exists", |t| t.yellow().to_string()),
            "\u{26a0} exists"
        );
    }

    #[test]
    fn config_format_used_when_flag_absent() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;
        let out = OutputManager::new(&GlobalArgs::default(), &config);
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn flag_format_beats_config() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;
        assert_eq!(
            manager(OutputFormat::Plain, true).format(),
            OutputFormat::Plain
        );
        let args = GlobalArgs {
            output_format: Some(OutputFormat::Plain),
            ..GlobalArgs::default()
        };
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Plain);
    }
}
