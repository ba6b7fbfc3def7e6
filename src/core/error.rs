//! Error handling for the launcher.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`LauncherError`]) so the flow can decide
//!    which failures are fatal and which degrade to "launch what's installed"
//! 2. **User-friendly messages** with a suggestion line for the failures that
//!    do reach the terminal
//!
//! Only two error classes abort the run before the child is launched:
//! [`LauncherError::UnsupportedPlatform`] (no release channel exists for this
//! host) and [`LauncherError::ChildLaunch`] (the managed executable could not
//! be spawned). Network and extraction failures are downgraded to warnings by
//! the orchestration layer in [`crate::updater`].

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launcher operations.
///
/// Each variant corresponds to one failure mode of the update-then-launch
/// flow. Variants carry enough context (paths, operation names) to produce an
/// actionable message without a backtrace.
#[derive(Error, Debug)]
pub enum LauncherError {
    /// The host platform maps to none of the published release channels.
    ///
    /// Raised before any network or file system access. butler is published
    /// for darwin-amd64, linux-amd64 and windows-amd64 only; the launcher
    /// fails loudly on anything else rather than guessing a channel.
    #[error("no butler release channel exists for this platform: {os}")]
    UnsupportedPlatform {
        /// Operating system name as reported by `std::env::consts::OS`.
        os: String,
    },

    /// An HTTP request to the release server failed.
    ///
    /// Covers both the LATEST version lookup and the archive download.
    /// The orchestration layer treats this as non-fatal and launches the
    /// existing installation instead.
    #[error("network request failed while {operation}")]
    Network {
        /// What the launcher was doing (e.g. "fetching the latest version").
        operation: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The downloaded archive could not be unpacked.
    ///
    /// Raised for corrupt archives and for I/O failures while writing the
    /// unpacked files. The version marker is left untouched when this
    /// happens, so the next run retries the update.
    #[error("failed to unpack the downloaded archive: {reason}")]
    Extraction {
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// The managed executable could not be spawned or waited on.
    ///
    /// Fatal: there is nothing to forward an exit code from. The most common
    /// cause is a first run with no network access, where no installation
    /// exists yet.
    #[error("failed to launch {}: {reason}", path.display())]
    ChildLaunch {
        /// Path to the executable the launcher tried to spawn.
        path: PathBuf,
        /// Human-readable description of the spawn failure.
        reason: String,
    },

    /// A file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrapper adding a user-facing suggestion to a fatal error.
///
/// Built by [`user_friendly_error`] at the binary boundary; everything below
/// that propagates plain `anyhow::Error` values.
pub struct ErrorContext {
    error: anyhow::Error,
    suggestion: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion attached.
    #[must_use]
    pub fn new(error: anyhow::Error) -> Self {
        Self { error, suggestion: None }
    }

    /// Attach a suggestion line shown under the error message.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Print the error (and its cause chain) to stderr with color.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);

        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".yellow(), cause);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!();
            eprintln!("{} {}", "Suggestion:".cyan(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Downcasts to [`LauncherError`] where possible and picks a suggestion
/// matching the failure mode.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<LauncherError>() {
        Some(LauncherError::UnsupportedPlatform { .. }) => Some(
            "butler is published for darwin-amd64, linux-amd64 and windows-amd64 only".to_string(),
        ),
        Some(LauncherError::ChildLaunch { .. }) => Some(
            "delete the butler directory next to the launcher and run again with network \
             access to force a fresh install"
                .to_string(),
        ),
        Some(LauncherError::Network { .. }) => {
            Some("check your internet connection and try again".to_string())
        }
        _ => None,
    };

    let ctx = ErrorContext::new(error);
    match suggestion {
        Some(s) => ctx.with_suggestion(s),
        None => ctx,
    }
}
