//! Platform detection and release channel selection.
//!
//! broth.itch.ovh publishes butler builds per channel, where a channel names
//! a platform+architecture pair. The launcher supports the three channels
//! butler ships for and refuses to run anywhere else - guessing a channel
//! would download a binary that cannot execute on the host.

use crate::core::LauncherError;
use std::fmt;

/// A butler release channel: the closed set of platform+architecture pairs
/// published on broth.itch.ovh.
///
/// Resolved once at startup from the compile-time target and immutable for
/// the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// macOS on x86-64.
    DarwinAmd64,
    /// Linux on x86-64.
    LinuxAmd64,
    /// Windows on x86-64.
    WindowsAmd64,
}

impl Channel {
    /// Resolve the channel for the host platform.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::UnsupportedPlatform`] when the target OS is
    /// not one butler is published for. This happens before any network or
    /// file system access.
    pub fn detect() -> Result<Self, LauncherError> {
        if cfg!(target_os = "macos") {
            Ok(Self::DarwinAmd64)
        } else if cfg!(target_os = "linux") {
            Ok(Self::LinuxAmd64)
        } else if cfg!(target_os = "windows") {
            Ok(Self::WindowsAmd64)
        } else {
            Err(LauncherError::UnsupportedPlatform { os: std::env::consts::OS.to_string() })
        }
    }

    /// The channel identifier as used in broth.itch.ovh URL paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DarwinAmd64 => "darwin-amd64",
            Self::LinuxAmd64 => "linux-amd64",
            Self::WindowsAmd64 => "windows-amd64",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_match_the_published_channels() {
        assert_eq!(Channel::DarwinAmd64.as_str(), "darwin-amd64");
        assert_eq!(Channel::LinuxAmd64.as_str(), "linux-amd64");
        assert_eq!(Channel::WindowsAmd64.as_str(), "windows-amd64");
    }

    #[test]
    fn detect_succeeds_on_supported_hosts() {
        // CI and dev machines are always one of the three supported targets.
        let channel = Channel::detect().unwrap();
        assert!(matches!(
            channel,
            Channel::DarwinAmd64 | Channel::LinuxAmd64 | Channel::WindowsAmd64
        ));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Channel::LinuxAmd64.to_string(), "linux-amd64");
    }
}
