//! The managed installation directory and archive extraction.
//!
//! The unpacked butler release lives in a fixed subdirectory next to the
//! launcher binary. Updates extract the downloaded zip over the existing
//! contents (overwrite semantics, not transactional): a failed extraction can
//! leave the directory in a mixed state, which is why the caller must not
//! write the version marker until extraction has succeeded.

use crate::constants::MANAGED_EXECUTABLE;
use crate::core::LauncherError;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::debug;

/// The directory holding the downloaded butler executable and its supporting
/// files.
#[derive(Debug, Clone)]
pub struct ManagedInstallation {
    dir: PathBuf,
}

impl ManagedInstallation {
    /// Create a handle for the installation rooted at `dir`.
    ///
    /// The directory itself is created lazily by [`extract_archive`].
    ///
    /// [`extract_archive`]: Self::extract_archive
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Root directory of the installation.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the managed executable inside the installation.
    ///
    /// Appends `.exe` on Windows; the archive layout is flat, so the
    /// executable sits directly in the installation root.
    #[must_use]
    pub fn executable_path(&self) -> PathBuf {
        if cfg!(windows) {
            self.dir.join(format!("{MANAGED_EXECUTABLE}.exe"))
        } else {
            self.dir.join(MANAGED_EXECUTABLE)
        }
    }

    /// Unpack `archive` into the installation directory, overwriting any
    /// existing contents.
    ///
    /// Extraction runs on the blocking thread pool since the `zip` crate is
    /// synchronous. Unix permissions recorded in the archive are preserved,
    /// so the butler binary comes out executable.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Extraction`] for a corrupt archive or a
    /// failed write, and [`LauncherError::Io`] if the installation directory
    /// cannot be created. On failure the caller must leave the version
    /// marker untouched so the next run retries.
    pub async fn extract_archive(&self, archive: &Path) -> Result<(), LauncherError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let archive = archive.to_path_buf();
        let dir = self.dir.clone();
        debug!(archive = %archive.display(), dir = %dir.display(), "extracting archive");

        task::spawn_blocking(move || {
            let file = std::fs::File::open(&archive)?;
            let mut zip = zip::ZipArchive::new(file)
                .map_err(|err| LauncherError::Extraction { reason: err.to_string() })?;
            zip.extract(&dir)
                .map_err(|err| LauncherError::Extraction { reason: err.to_string() })
        })
        .await
        .map_err(|err| LauncherError::Extraction {
            reason: format!("extraction task failed: {err}"),
        })?
    }
}
