//! Dsconv CLI - datastore config converter.
//!
//! Reads a repo config, converts its `Datastore` section between schema
//! versions 5 and 6, and writes the result. Reads stdin and writes stdout
//! unless `--input`/`--output` are given.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use dsconv_config::Direction;
use dsconv_telemetry::{LogConfig, LogFormat};

mod commands;

/// Exit status for invalid invocations.
const EXIT_USAGE: u8 = 1;
/// Exit status for failed conversions.
const EXIT_CONVERSION: u8 = 2;

/// Convert a repo config's datastore section between versions 5 and 6
#[derive(Parser)]
#[command(name = "dsconv")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: dsconv 5-to-6 < old.config > new.config")]
struct Cli {
    /// Conversion direction
    #[arg(value_name = "DIRECTION", value_parser = direction_parser())]
    direction: Direction,

    /// Read the config from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the converted config to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log level filter (ignored with --verbose)
    #[arg(long, env = "DSCONV_LOG", default_value = "warn")]
    log_level: String,

    /// Log format: compact (default), pretty or json
    #[arg(long, env = "DSCONV_LOG_FORMAT", default_value = "compact")]
    log_format: LogFormat,

    /// Disable colors in log output
    #[arg(long, env = "DSCONV_NO_COLOR")]
    no_color: bool,
}

/// Accept only the canonical direction names, listing them in `--help`.
fn direction_parser() -> impl TypedValueParser<Value = Direction> {
    PossibleValuesParser::new(Direction::ALL.map(Direction::name))
        .try_map(|name| name.parse::<Direction>())
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        let level = if self.verbose { "debug" } else { self.log_level.as_str() };
        let config = LogConfig::new(level)
            .with_format(self.log_format)
            .without_timestamps();
        if self.no_color {
            config.without_ansi()
        } else {
            config
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests are not errors.
            let code = if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        },
    };

    if let Err(e) = dsconv_telemetry::setup_logging(&cli.log_config()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match commands::convert::run(cli.direction, cli.input.as_deref(), cli.output.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("conversion {} failed: {e}", cli.direction);
            ExitCode::from(EXIT_CONVERSION)
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_direction_and_files() {
        let cli = Cli::try_parse_from(["dsconv", "6-to-5", "-i", "in.json", "--output", "out.json"])
            .unwrap();
        assert_eq!(cli.direction, Direction::Downgrade);
        assert_eq!(cli.input, Some(PathBuf::from("in.json")));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_rejects_bad_invocations() {
        assert!(Cli::try_parse_from(["dsconv"]).is_err());
        assert!(Cli::try_parse_from(["dsconv", "7-to-8"]).is_err());
        assert!(Cli::try_parse_from(["dsconv", "5-to-6", "6-to-5"]).is_err());
    }

    #[test]
    fn test_verbose_overrides_level() {
        let cli = Cli::try_parse_from(["dsconv", "5-to-6", "-v", "--log-level", "error"]).unwrap();
        assert_eq!(cli.log_config().level, "debug");

        let cli = Cli::try_parse_from(["dsconv", "5-to-6", "--log-level", "error"]).unwrap();
        assert_eq!(cli.log_config().level, "error");
    }

    #[test]
    fn test_no_color_disables_ansi() {
        let cli = Cli::try_parse_from(["dsconv", "5-to-6", "--no-color"]).unwrap();
        assert!(!cli.log_config().ansi);

        let cli = Cli::try_parse_from(["dsconv", "5-to-6"]).unwrap();
        assert_eq!(cli.log_config().ansi, !cli.no_color);
    }

    #[test]
    fn test_help_lists_directions() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("possible values: 5-to-6, 6-to-5"), "help: {help}");
    }
}
