//! update-notifier - checks a release hosting API for a newer version
//!
//! - Fetches the newest entry of a release list (`check`, the default)
//! - Keeps checking on an interval (`watch`)
//! - Shows an update dialog with the release page and direct download links

mod cli;
mod logging;
mod settings;
mod ui;
mod updater;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};
use settings::SettingsError;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let mut cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let command = cli
        .command
        .take()
        .unwrap_or_else(|| Commands::Check(Default::default()));

    match command {
        Commands::Check(args) => with_settings(&cli, |settings| {
            finish(cli::check::run(args, settings))
        }),
        Commands::Watch(args) => with_settings(&cli, |settings| {
            finish(cli::watch::run(args, settings))
        }),
        Commands::Compare(args) => with_settings(&cli, |settings| {
            if cli::compare::run(args, &settings.current_version) {
                exit_codes::SUCCESS
            } else {
                exit_codes::NOT_NEWER
            }
        }),
        Commands::Config(args) => finish(cli::config::run(args, &cli)),
    }
}

/// Load settings, or bail out with the config exit code
fn with_settings(cli: &Cli, f: impl FnOnce(settings::Settings) -> i32) -> i32 {
    match cli.load_settings() {
        Ok(settings) => {
            tracing::debug!(
                endpoint = %settings.endpoint,
                current = %settings.current_version,
                "Settings loaded"
            );
            f(settings)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::CONFIG_ERROR
        }
    }
}

fn finish(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            categorize_error(&e)
        }
    }
}

/// Categorize an error into the appropriate exit code
fn categorize_error(e: &anyhow::Error) -> i32 {
    if e.chain().any(|cause| cause.is::<SettingsError>()) {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::UNEXPECTED_FAILURE
    }
}
