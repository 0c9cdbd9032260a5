pub mod file;

use crate::config::{self, ConfigError};
use crate::test_case::{ProgramCommand, RunError};
use crate::test_runner::{self, ReportConfig};
use crate::variant::ProjectVariant;
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Golden output tester for course projects
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Describe at most N failing tests in detail
    #[arg(long, value_name = "N", overrides_with = "show")]
    pub show: Option<usize>,

    /// Test inputs (`ID.in`), directories or glob patterns. Options end at
    /// the first of them.
    #[arg(trailing_var_arg = true)]
    pub tests: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Failed to determine current directory: {0}")]
    CurrentDir(io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Program(#[from] RunError),
}

pub fn parse<I, T>(variant: &ProjectVariant, args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args).map_err(|err| {
        debug!(error = %err, "rejected command line");
        CliError::Usage(variant.usage())
    })
}

/// Entry point shared by the tester binaries
pub fn main(variant: ProjectVariant) -> ExitCode {
    init_tracing();

    match run(variant, env::args_os()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Parse `args`, run the tests they name, and tell whether all passed
pub fn run<I, T>(variant: ProjectVariant, args: I) -> Result<bool, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = parse(&variant, args)?;

    let current_dir = env::current_dir().map_err(CliError::CurrentDir)?;
    let runner_config = config::load(&current_dir)?.apply(variant);
    let variant = runner_config.variant;

    let command = ProgramCommand::resolve(&variant.program, &current_dir)?;
    let test_ids = file::expand_test_paths(&args.tests, &current_dir);

    let report_config = ReportConfig {
        number_of_tests: test_ids.len(),
        format: runner_config.output_format,
        show: args.show,
        char_limit: variant.report_char_limit,
        current_dir,
    };

    Ok(test_runner::test_all(
        &report_config,
        &variant,
        &command,
        &test_ids,
        runner_config.parallel,
    ))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_and_tests() {
        let args = parse(
            &ProjectVariant::make(),
            ["make-tester", "--show=3", "t1.in", "t2.in"],
        )
        .unwrap();

        assert_eq!(args.show, Some(3));
        assert_eq!(args.tests, vec!["t1.in", "t2.in"]);
    }

    #[test]
    fn test_parse_without_show() {
        let args = parse(&ProjectVariant::trip(), ["trip-tester", "t1.in"]).unwrap();

        assert_eq!(args.show, None);
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        let err = parse(&ProjectVariant::make(), ["make-tester", "--bogus", "t1.in"]).unwrap_err();

        assert_eq!(err.to_string(), "Usage: make-tester [--show=N] TEST...");
    }

    #[test]
    fn test_parse_rejects_non_integer_show() {
        let result = parse(&ProjectVariant::make(), ["make-tester", "--show=many", "t1.in"]);

        assert!(matches!(result, Err(CliError::Usage(_))));
    }

    #[test]
    fn test_parse_rejects_help() {
        let result = parse(&ProjectVariant::galaxy(), ["galaxy-tester", "--help"]);

        assert!(matches!(result, Err(CliError::Usage(_))));
    }

    #[test]
    fn test_parse_accepts_no_tests() {
        let args = parse(&ProjectVariant::make(), ["make-tester"]).unwrap();

        assert_eq!(args.show, None);
        assert!(args.tests.is_empty());
    }

    #[test]
    fn test_parse_last_show_wins() {
        let args = parse(
            &ProjectVariant::make(),
            ["make-tester", "--show=3", "--show=4", "t1.in"],
        )
        .unwrap();

        assert_eq!(args.show, Some(4));
        assert_eq!(args.tests, vec!["t1.in"]);
    }

    #[test]
    fn test_parse_options_end_at_first_test() {
        let args = parse(&ProjectVariant::make(), ["make-tester", "t1.in", "--show=2"]).unwrap();

        assert_eq!(args.show, None);
        assert_eq!(args.tests, vec!["t1.in", "--show=2"]);
    }
}
