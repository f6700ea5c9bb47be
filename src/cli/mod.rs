//! Command-line interface

pub mod check;
pub mod compare;
pub mod config;
pub mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::{Settings, SettingsError};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// `compare`: the candidate is not newer
    pub const NOT_NEWER: i32 = 1;
    pub const UNEXPECTED_FAILURE: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

#[derive(Debug, Parser)]
#[command(name = "update-notifier", version, about = "Check for a newer release and show an update prompt")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long = "json-logs", global = true)]
    pub json_output: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Release-list endpoint
    #[arg(long, global = true, env = "UPDATE_NOTIFIER_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Version of the running application, e.g. v2.3.1
    #[arg(long, global = true, env = "UPDATE_NOTIFIER_CURRENT_VERSION", value_name = "VERSION")]
    pub current_version: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check once for a newer release (default)
    Check(check::CheckArgs),
    /// Check at startup and then periodically
    Watch(watch::WatchArgs),
    /// Compare two version tags
    Compare(compare::CompareArgs),
    /// Inspect or create the settings file
    Config(config::ConfigArgs),
}

impl Cli {
    /// Where settings are read from
    pub fn settings_path(&self) -> Result<PathBuf, SettingsError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Settings::default_path(),
        }
    }

    /// Settings file merged with command-line and environment overrides
    pub fn load_settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = Settings::load_from(&self.settings_path()?)?;
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(version) = &self.current_version {
            settings.current_version = version.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["update-notifier", "--verbose"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "endpoint = \"https://example.com/a\"\ncurrent_version = \"v1.0.0\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "update-notifier",
            "check",
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:9/releases",
        ])
        .unwrap();
        let settings = cli.load_settings().unwrap();

        assert_eq!(settings.endpoint, "http://127.0.0.1:9/releases");
        assert_eq!(settings.current_version, "v1.0.0");
    }

    #[test]
    fn test_override_replaces_invalid_file_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "endpoint = \"not a url\"\ncurrent_version = \"\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "update-notifier",
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "https://example.com/releases",
            "--current-version",
            "v2.0.0",
        ])
        .unwrap();
        let settings = cli.load_settings().unwrap();

        assert_eq!(settings.endpoint, "https://example.com/releases");
        assert_eq!(settings.current_version, "v2.0.0");

        // without overrides the bad file value is still reported
        let cli = Cli::try_parse_from(["update-notifier", "--config", path.to_str().unwrap()])
            .unwrap();
        assert!(matches!(
            cli.load_settings(),
            Err(SettingsError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let cli = Cli::try_parse_from([
            "update-notifier",
            "--config",
            path.to_str().unwrap(),
            "--current-version",
            "",
        ])
        .unwrap();
        assert!(matches!(
            cli.load_settings(),
            Err(SettingsError::EmptyVersion)
        ));
    }
}
