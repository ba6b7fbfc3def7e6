//! Orchestration of the update-then-launch flow.
//!
//! [`Launcher`] wires the collaborators together and walks the state machine:
//!
//! ```text
//! Start -> ChannelResolved -> VersionRead -> VersionFetched
//!       -> {UpToDate | Updating -> Updated} -> Launching -> Exited
//! ```
//!
//! The update sequence (download to a temp file, unpack over the managed
//! directory, delete the temp file, rewrite the marker) is strictly
//! sequential with no retries and no partial-success checkpoints beyond the
//! step ordering itself. The marker write comes last so a parseable marker
//! always names a fully extracted installation.
//!
//! # Failure Policy
//!
//! One uniform rule: never block the launch on update machinery.
//!
//! - Unsupported platform is fatal before any network access.
//! - A failed LATEST fetch, download or extraction logs a warning, leaves the
//!   marker untouched, and proceeds to launch whatever is installed.
//! - A failed launch is fatal with a nonzero exit.


use crate::channel::Channel;
use crate::install::ManagedInstallation;
use crate::remote::{ReleaseSource, should_update};
use crate::runner::ProcessRunner;
use crate::store::VersionStore;
use crate::version::Version;
use anyhow::{Context, Result};
use colored::Colorize;
use std::ffi::OsString;
use tracing::{debug, warn};

/// The whole program as a value: version store, release source, managed
/// installation and process runner, composed into one sequential flow.
///
/// The collaborators are generic so tests can substitute in-memory fakes for
/// the network and the child process (the store and installation are plain
/// directories and test fine as-is).
pub struct Launcher<S, R> {
    store: VersionStore,
    installation: ManagedInstallation,
    source: S,
    runner: R,
}

impl<S: ReleaseSource, R: ProcessRunner> Launcher<S, R> {
    /// Compose a launcher from its collaborators.
    pub fn new(store: VersionStore, installation: ManagedInstallation, source: S, runner: R) -> Self {
        Self { store, installation, source, runner }
    }

    /// Run the full flow and return the managed executable's exit code.
    ///
    /// `args` are forwarded to the child verbatim, one argument vector entry
    /// per entry - never joined.
    ///
    /// # Errors
    ///
    /// Returns an error only for the fatal cases: an unsupported platform or
    /// a child that could not be launched. Update failures degrade to a
    /// warning and a launch of the existing installation.
    pub async fn run(&self, args: &[OsString]) -> Result<i32> {
        let channel = Channel::detect()?;
        println!("Channel: {}", channel.to_string().cyan());

        let installed = self.store.read_installed().await;
        println!("Installed version: {}", installed.to_string().yellow());

        match self.source.fetch_latest(channel).await {
            Ok(latest) => {
                println!("Latest version: {}", latest.to_string().green());
                if should_update(&installed, &latest) {
                    if let Err(err) = self.update(channel, &latest).await {
                        warn!(%err, "update failed, launching the existing installation");
                        println!(
                            "{} update failed ({err}), launching the existing installation",
                            "Warning:".yellow()
                        );
                    }
                } else {
                    debug!(%installed, "already up to date");
                }
            }
            Err(err) => {
                warn!(%err, "could not reach the update server");
                println!(
                    "{} could not reach the update server ({err}), launching the existing \
                     installation",
                    "Warning:".yellow()
                );
            }
        }

        println!("Running butler");
        let code = self.runner.run(&self.installation.executable_path(), args).await?;
        Ok(code)
    }

    /// Download and unpack `latest`, then persist it as the installed
    /// version.
    ///
    /// The archive is staged in a temp file that is removed before the
    /// marker write; dropping the guard also removes it on every error path.
    async fn update(&self, channel: Channel, latest: &Version) -> Result<()> {
        println!("Updating butler to {}", latest.to_string().green().bold());

        let staging = tempfile::Builder::new()
            .prefix("butler-")
            .suffix(".zip")
            .tempfile()
            .context("failed to create a staging file for the release archive")?;

        self.source.download_archive(channel, staging.path()).await?;
        self.installation.extract_archive(staging.path()).await?;
        staging.close().context("failed to remove the downloaded archive")?;

        self.store.write_installed(latest).await?;
        println!("Finished updating butler to {}", latest.to_string().green().bold());
        Ok(())
    }
}
