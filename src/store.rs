//! The on-disk version marker file.
//!
//! A single plain-text file next to the launcher binary records the version
//! of the installed butler. It is read (never mutated) on every startup and
//! rewritten only after an update has fully completed, so a parseable marker
//! always describes the installation that the last successful update left
//! behind.
//!
//! Read failures of any kind (missing file, unreadable file, garbage
//! contents) degrade to [`Version::Unknown`] instead of erroring: an
//! untrusted marker simply forces the next update.

use crate::version::Version;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Reads and rewrites the installed-version marker file.
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    /// Create a store for the marker at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the marker file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the installed version.
    ///
    /// Never fails: an absent, unreadable or unparseable marker yields
    /// [`Version::Unknown`], which orders below every real version and so
    /// forces an update.
    pub async fn read_installed(&self) -> Version {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no version marker, treating as unknown");
                return Version::Unknown;
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    %err,
                    "failed to read version marker, treating as unknown"
                );
                return Version::Unknown;
            }
        };

        let version = Version::parse_or_unknown(&text);
        if version.is_unknown() {
            warn!(
                path = %self.path.display(),
                contents = text.trim(),
                "version marker is unparseable, treating as unknown"
            );
        }
        version
    }

    /// Overwrite the marker with the textual form of `version`.
    ///
    /// Must only be called after the corresponding installation completed
    /// successfully; the caller in [`crate::updater`] enforces the ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker file cannot be written.
    pub async fn write_installed(&self, version: &Version) -> Result<()> {
        fs::write(&self.path, version.to_string())
            .await
            .with_context(|| format!("failed to write version marker {}", self.path.display()))?;
        debug!(path = %self.path.display(), %version, "wrote version marker");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> VersionStore {
        VersionStore::new(dir.path().join("butler-version.txt"))
    }

    #[tokio::test]
    async fn missing_marker_reads_as_unknown() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.read_installed().await, Version::Unknown);
    }

    #[tokio::test]
    async fn garbage_marker_reads_as_unknown() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "definitely not a version").unwrap();

        assert_eq!(store.read_installed().await, Version::Unknown);
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let version: Version = "15.21.0".parse().unwrap();

        store.write_installed(&version).await.unwrap();

        assert_eq!(store.read_installed().await, version);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "15.21.0");
    }

    #[tokio::test]
    async fn write_overwrites_the_previous_marker() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write_installed(&"1.0.0".parse().unwrap()).await.unwrap();
        store.write_installed(&"1.0.1".parse().unwrap()).await.unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "1.0.1");
    }

    #[tokio::test]
    async fn marker_with_surrounding_whitespace_parses() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "1.2.3\n").unwrap();

        assert_eq!(store.read_installed().await, "1.2.3".parse().unwrap());
    }
}
