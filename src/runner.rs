//! Child process spawning with inherited stdio.
//!
//! The launcher's defining contract is transparency: the managed executable
//! gets the caller's arguments exactly as received (as distinct argument
//! vector entries, never joined into one string), shares the launcher's
//! stdin/stdout/stderr, and its exit code becomes the launcher's exit code
//! unchanged. No timeout is applied to the wait; butler sessions can
//! legitimately run for hours.

use crate::core::LauncherError;
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Spawns the managed executable and yields its exit code.
///
/// Implemented by [`ChildProcess`] in production and by recording fakes in
/// tests.
pub trait ProcessRunner {
    /// Run `executable` with `args`, blocking the flow until it terminates.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ChildLaunch`] if the executable is missing,
    /// not executable, or cannot be waited on.
    async fn run(&self, executable: &Path, args: &[OsString]) -> Result<i32, LauncherError>;
}

/// Production [`ProcessRunner`] over [`tokio::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildProcess;

impl ProcessRunner for ChildProcess {
    async fn run(&self, executable: &Path, args: &[OsString]) -> Result<i32, LauncherError> {
        debug!(executable = %executable.display(), ?args, "spawning managed executable");

        let launch_error = |err: std::io::Error| LauncherError::ChildLaunch {
            path: executable.to_path_buf(),
            reason: err.to_string(),
        };

        let mut child = Command::new(executable)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(launch_error)?;

        let status = child.wait().await.map_err(launch_error)?;
        let code = exit_code(status);
        debug!(code, "managed executable exited");
        Ok(code)
    }
}

/// Map an exit status to the code the launcher should exit with.
///
/// A child killed by a signal has no code; Unix convention maps signal `n`
/// to `128 + n`, anything else falls back to 1.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn script(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn exit_code_is_forwarded_unchanged() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "fake-butler", "exit 7");

        let code = ChildProcess.run(&exe, &[]).await.unwrap();
        assert_eq!(code, 7);
    }

    #[tokio::test]
    async fn zero_exit_is_forwarded_too() {
        let dir = TempDir::new().unwrap();
        let exe = script(&dir, "fake-butler", "exit 0");

        let code = ChildProcess.run(&exe, &[]).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn arguments_reach_the_child_as_distinct_values() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("args.txt");
        // One argument per line; an argument containing a space must stay one line.
        let exe = script(&dir, "fake-butler", r#"printf '%s\n' "$@" > "$1""#);

        let args = vec![
            OsString::from(out.to_string_lossy().into_owned()),
            OsString::from("push"),
            OsString::from("my game"),
        ];
        ChildProcess.run(&exe, &args).await.unwrap();

        let recorded = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = recorded.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "push");
        assert_eq!(lines[2], "my game");
    }

    #[tokio::test]
    async fn missing_executable_is_a_child_launch_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = ChildProcess.run(&missing, &[]).await.unwrap_err();
        assert!(matches!(err, LauncherError::ChildLaunch { .. }));
    }
}
