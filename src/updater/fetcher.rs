//! Release list client
//!
//! Fetches the release list with a single GET and returns its first entry.
//! Every failure is logged and collapsed into `None` so an update check can
//! never take the host application down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use url::Url;

use super::error::UpdateError;
use super::release::{parse_release_list, ReleaseDescriptor};
use crate::settings::Settings;

/// Anything that can report the latest published release
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Latest release, or `None` if it could not be determined
    async fn latest_release(&self) -> Option<ReleaseDescriptor>;
}

#[async_trait]
impl<T: ReleaseSource + ?Sized> ReleaseSource for Arc<T> {
    async fn latest_release(&self) -> Option<ReleaseDescriptor> {
        (**self).latest_release().await
    }
}

/// HTTP client for the release-list endpoint
pub struct ReleaseFetcher {
    client: reqwest::Client,
    endpoint: Url,
    busy: AtomicBool,
}

impl ReleaseFetcher {
    /// Build a fetcher for `endpoint`.
    ///
    /// Release APIs commonly reject anonymous requests, so `user_agent` is
    /// required. The TLS floor is set to 1.0 so hosts speaking any of
    /// TLS 1.0/1.1/1.2 or newer can be negotiated.
    pub fn new(endpoint: Url, user_agent: &str, timeout: Duration) -> Result<Self, UpdateError> {
        let user_agent = user_agent.trim();
        if user_agent.is_empty() {
            return Err(UpdateError::MissingUserAgent);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .min_tls_version(reqwest::tls::Version::TLS_1_0)
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            busy: AtomicBool::new(false),
        })
    }

    /// Build a fetcher from validated settings
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let endpoint = settings.endpoint_url()?;
        Ok(Self::new(endpoint, &settings.user_agent, settings.timeout())?)
    }

    /// Whether a request is currently in flight
    #[allow(dead_code)]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Fetch the latest release, logging and swallowing any failure.
    ///
    /// Returns `None` right away if another fetch is still running.
    pub async fn fetch_latest(&self) -> Option<ReleaseDescriptor> {
        match self.try_fetch_latest().await {
            Ok(release) => Some(release),
            Err(UpdateError::Busy) => {
                tracing::debug!("Release fetch already in progress, skipping");
                None
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, "Failed to fetch latest release: {}", e);
                None
            }
        }
    }

    /// Fetch the latest release, reporting why it failed
    pub async fn try_fetch_latest(&self) -> Result<ReleaseDescriptor, UpdateError> {
        let _guard = self.acquire().ok_or(UpdateError::Busy)?;

        tracing::debug!(endpoint = %self.endpoint, "Fetching release list");
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::Status(status));
        }

        let body = response.text().await?;
        let releases = parse_release_list(&body)?;
        tracing::debug!(count = releases.len(), "Release list received");

        releases.into_iter().next().ok_or(UpdateError::NoReleases)
    }

    fn acquire(&self) -> Option<BusyGuard<'_>> {
        if self.busy.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(BusyGuard(&self.busy))
        }
    }
}

#[async_trait]
impl ReleaseSource for ReleaseFetcher {
    async fn latest_release(&self) -> Option<ReleaseDescriptor> {
        self.fetch_latest().await
    }
}

/// Clears the busy flag when the request finishes, however it finishes
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
