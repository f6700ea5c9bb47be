//! The update check: fetch, compare, hand off to the UI thread

use crossbeam_channel::Sender;
use serde::Serialize;

use super::fetcher::ReleaseSource;
use super::release::ReleaseDescriptor;
use super::version::is_newer;
use crate::ui::UiEvent;

/// Everything the update dialog shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePrompt {
    pub new_version: String,
    pub current_version: String,
    pub release_url: String,
    /// First asset of the release; releases without assets only link the page
    pub download_url: Option<String>,
    pub release_notes: Option<String>,
}

impl UpdatePrompt {
    pub fn new(release: &ReleaseDescriptor, current_version: &str) -> Self {
        Self {
            new_version: release.tag_name.clone(),
            current_version: current_version.to_string(),
            release_url: release.html_url.clone(),
            download_url: release.first_download_url().map(str::to_string),
            release_notes: release
                .body
                .as_ref()
                .filter(|b| !b.trim().is_empty())
                .cloned(),
        }
    }
}

/// Result of a single update check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Release information could not be fetched
    FetchFailed,
    /// The latest release is not newer than the running version
    UpToDate { latest: String },
    /// A newer release exists and the prompt was handed to the UI thread
    UpdateAvailable(UpdatePrompt),
}

/// Runs the update check against a release source
pub struct UpdateCheck<S> {
    source: S,
    current_version: String,
    ui: Sender<UiEvent>,
}

impl<S: ReleaseSource> UpdateCheck<S> {
    pub fn new(source: S, current_version: impl Into<String>, ui: Sender<UiEvent>) -> Self {
        Self {
            source,
            current_version: current_version.into(),
            ui,
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Check once. Never fails: problems end up in the log and the outcome.
    pub async fn run(&self) -> CheckOutcome {
        let Some(latest) = self.source.latest_release().await else {
            tracing::error!("Error getting update info");
            return CheckOutcome::FetchFailed;
        };

        if !is_newer(&latest.tag_name, &self.current_version) {
            tracing::debug!(
                latest = %latest.tag_name,
                current = %self.current_version,
                "Already up to date"
            );
            return CheckOutcome::UpToDate {
                latest: latest.tag_name,
            };
        }

        tracing::info!(
            latest = %latest.tag_name,
            current = %self.current_version,
            "New version available"
        );

        let prompt = UpdatePrompt::new(&latest, &self.current_version);
        if self.ui.send(UiEvent::UpdateAvailable(prompt.clone())).is_err() {
            tracing::warn!("UI thread is gone, update prompt dropped");
        }

        CheckOutcome::UpdateAvailable(prompt)
    }
}
