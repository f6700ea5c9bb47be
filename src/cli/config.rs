//! `config`: show, locate or create the settings file

use std::path::Path;

use clap::{Args, Subcommand};

use super::Cli;
use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings as TOML
    Show,
    /// Print where the settings file lives
    Path,
    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Only `show` needs a loadable settings file, so a broken one can still be
/// located and replaced.
pub fn run(args: ConfigArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = cli.settings_path()?;
    let path = path.as_path();

    match args.action {
        ConfigAction::Show => print!("{}", cli.load_settings()?.to_toml()?),
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            init(path, force)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    Settings::default().save_to(path)?;
    tracing::info!(path = %path.display(), "Wrote default settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        init(&path, false).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        std::fs::write(&path, "open_links = false\n").unwrap();
        assert!(init(&path, false).is_err());
        assert!(!Settings::load_from(&path).unwrap().open_links);

        init(&path, true).unwrap();
        assert!(Settings::load_from(&path).unwrap().open_links);
    }
}
