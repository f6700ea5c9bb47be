//! Settings for the update check
//!
//! Stored as TOML in the user's config directory. Every field is optional in
//! the file; missing fields fall back to the defaults baked into the build.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Release list of the published builds, newest first
pub const DEFAULT_ENDPOINT: &str =
    "https://api.github.com/repos/update-notifier/update-notifier/releases";

/// Version of this build, in release tag form
pub const CURRENT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

const DEFAULT_USER_AGENT: &str = concat!("update-notifier/", env!("CARGO_PKG_VERSION"));
const SETTINGS_DIR: &str = "update-notifier";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Endpoint must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("User-Agent must not be empty")]
    EmptyUserAgent,

    #[error("Current version must not be empty")]
    EmptyVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Release-list endpoint returning a JSON array, newest first
    pub endpoint: String,
    /// Version of the running application, e.g. "v2.3.1"
    pub current_version: String,
    /// Sent with every request; release APIs reject anonymous clients
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Interval between checks in watch mode
    pub check_interval_secs: u64,
    /// Offer to open the release links from the dialog
    pub open_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            current_version: CURRENT_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            check_interval_secs: 3600,
            open_links: true,
        }
    }
}

impl Settings {
    /// `<config_dir>/update-notifier/settings.toml`
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// Values are not validated here; overrides may still replace them, so
    /// call `validate` on the merged result.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_err)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.endpoint_url()?;
        if self.user_agent.trim().is_empty() {
            return Err(SettingsError::EmptyUserAgent);
        }
        if self.current_version.trim().is_empty() {
            return Err(SettingsError::EmptyVersion);
        }
        Ok(())
    }

    pub fn endpoint_url(&self) -> Result<Url, SettingsError> {
        let url = Url::parse(self.endpoint.trim()).map_err(|source| {
            SettingsError::InvalidEndpoint {
                url: self.endpoint.clone(),
                source,
            }
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SettingsError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs.max(1))
    }
}
