//! Command-line surface.
//!
//! The launcher is argument-transparent: everything on its command line
//! belongs to butler, including flags. The parser therefore disables clap's
//! own `--help`/`--version` handling and accepts leading hyphens, so
//! `butler-launcher --help` shows butler's help, not the launcher's.
//!
//! Logging verbosity comes from `RUST_LOG` instead of a flag for the same
//! reason - any flag the launcher claimed would be stolen from butler.

use crate::constants::{INSTALL_DIR_NAME, VERSION_MARKER_FILE};
use crate::install::ManagedInstallation;
use crate::remote::BrothClient;
use crate::runner::ChildProcess;
use crate::store::VersionStore;
use crate::updater::Launcher;
use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Transparent launcher for the itch.io butler CLI.
///
/// Keeps the local butler installation up to date, then runs butler with the
/// given arguments and exits with butler's exit code.
#[derive(Parser, Debug)]
#[command(
    name = "butler-launcher",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Arguments forwarded verbatim to butler.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "BUTLER_ARGS")]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Build the production collaborators and run the flow.
    ///
    /// # Errors
    ///
    /// Returns an error for the fatal cases only (unsupported platform,
    /// launcher location unresolvable, child launch failure); see
    /// [`crate::updater`] for the degradation policy on update failures.
    pub async fn execute(self) -> Result<i32> {
        let root = launcher_root()?;

        let launcher = Launcher::new(
            VersionStore::new(root.join(VERSION_MARKER_FILE)),
            ManagedInstallation::new(root.join(INSTALL_DIR_NAME)),
            BrothClient::new(),
            ChildProcess,
        );

        launcher.run(&self.args).await
    }
}

/// Directory containing the launcher binary; all persistent state lives here.
fn launcher_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the launcher executable")?;
    exe.parent()
        .map(PathBuf::from)
        .context("launcher executable has no parent directory")
}
