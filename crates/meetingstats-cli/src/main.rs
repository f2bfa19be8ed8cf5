//! meetingstats CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use meetingstats_cli::cli::{Cli, Command, ConfigAction};
use meetingstats_cli::commands;
use meetingstats_cli::config::AppConfig;
use meetingstats_cli::error::{CliError, CliResult};
use meetingstats_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::quiet()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path).map_err(CliError::Config)?
    } else {
        AppConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable configuration file");
            AppConfig::default()
        })
    };
    let config = config.with_overrides(&cli);

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(cli.config.as_deref()),
        },
        None => match cli.file {
            Some(ref file) => commands::report::run(file, &config, cli.json),
            None => Err(CliError::Config("no calendar file given".to_string())),
        },
    }
}
