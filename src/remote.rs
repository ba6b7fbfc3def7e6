//! The broth.itch.ovh release endpoints and the update decision.
//!
//! Two HTTP GET endpoints exist per channel, neither authenticated:
//!
//! - `<base>/<channel>/LATEST` - the latest version as a plain-text body
//! - `<base>/<channel>/LATEST/archive/default` - a zip of that release
//!
//! The [`ReleaseSource`] trait abstracts both so the orchestration flow can
//! be exercised with fakes; [`BrothClient`] is the production implementation
//! over [`reqwest`].

use crate::channel::Channel;
use crate::core::LauncherError;
use crate::version::Version;
use std::path::Path;
use tracing::debug;

/// Default base URL of the butler release server.
pub const DEFAULT_BASE_URL: &str = "https://broth.itch.ovh/butler";

/// Remote source of butler releases.
///
/// Implemented by [`BrothClient`] in production and by in-memory fakes in
/// tests. Both operations are plain GETs with no retry policy; callers decide
/// how failures degrade.
pub trait ReleaseSource {
    /// Fetch the latest published version for `channel`.
    ///
    /// An unparseable response body yields [`Version::Unknown`] rather than
    /// an error - the decision in [`should_update`] treats that as "assume an
    /// update is needed".
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Network`] if the request itself fails.
    async fn fetch_latest(&self, channel: Channel) -> Result<Version, LauncherError>;

    /// Download the latest release archive for `channel` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Network`] if the request fails, or
    /// [`LauncherError::Io`] if the archive cannot be written to `dest`.
    async fn download_archive(&self, channel: Channel, dest: &Path) -> Result<(), LauncherError>;
}

/// Decide whether an update is needed.
///
/// True when the remote version failed to parse (defensive: an unreadable
/// LATEST body means "assume update needed") or when it is strictly newer
/// than the installed one. Equal versions decide false, which is what makes
/// repeated runs idempotent: network reads happen, downloads do not.
#[must_use]
pub fn should_update(installed: &Version, latest: &Version) -> bool {
    latest.is_unknown() || latest > installed
}

/// Production [`ReleaseSource`] over the broth.itch.ovh HTTP endpoints.
///
/// No timeouts are configured, matching the rest of the flow: a hung request
/// hangs the launcher. The base URL is injectable for tests.
#[derive(Debug, Clone)]
pub struct BrothClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for BrothClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BrothClient {
    /// Create a client against [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    fn latest_url(&self, channel: Channel) -> String {
        format!("{}/{}/LATEST", self.base_url, channel.as_str())
    }

    fn archive_url(&self, channel: Channel) -> String {
        format!("{}/archive/default", self.latest_url(channel))
    }
}

impl ReleaseSource for BrothClient {
    async fn fetch_latest(&self, channel: Channel) -> Result<Version, LauncherError> {
        let url = self.latest_url(channel);
        debug!(%url, "fetching latest version");

        let network = |source| LauncherError::Network {
            operation: "fetching the latest version".to_string(),
            source,
        };

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(network)?
            .text()
            .await
            .map_err(network)?;

        Ok(Version::parse_or_unknown(&body))
    }

    async fn download_archive(&self, channel: Channel, dest: &Path) -> Result<(), LauncherError> {
        let url = self.archive_url(channel);
        debug!(%url, dest = %dest.display(), "downloading release archive");

        let network = |source| LauncherError::Network {
            operation: "downloading the release archive".to_string(),
            source,
        };

        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(network)?
            .bytes()
            .await
            .map_err(network)?;

        tokio::fs::write(dest, &bytes).await?;
        debug!(len = bytes.len(), "archive written");
        Ok(())
    }
}
