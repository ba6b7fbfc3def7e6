//! End-to-end flow test: a scripted release source feeding a real child
//! process.
//!
//! Exercises the full sequence from spec'd behavior: an installed 0.9.0, a
//! remote 1.0.0 with a runnable archive, a launch with forwarded arguments,
//! and the child's exit code propagated unchanged. Unix-only because the
//! fake butler is a shell script.

#![cfg(unix)]

use butler_launcher::channel::Channel;
use butler_launcher::core::LauncherError;
use butler_launcher::install::ManagedInstallation;
use butler_launcher::remote::ReleaseSource;
use butler_launcher::runner::ChildProcess;
use butler_launcher::store::VersionStore;
use butler_launcher::updater::Launcher;
use butler_launcher::version::Version;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Serves a fixed LATEST body and a fixed archive from memory.
struct ScriptedSource {
    latest_body: String,
    archive: Vec<u8>,
}

impl ReleaseSource for ScriptedSource {
    async fn fetch_latest(&self, _channel: Channel) -> Result<Version, LauncherError> {
        Ok(Version::parse_or_unknown(&self.latest_body))
    }

    async fn download_archive(&self, _channel: Channel, dest: &Path) -> Result<(), LauncherError> {
        tokio::fs::write(dest, &self.archive).await?;
        Ok(())
    }
}

/// Zip up a fake butler: a shell script that records its arguments (one per
/// line) into the file named by its first argument, then exits 7.
fn fake_butler_release() -> Vec<u8> {
    let script = concat!(
        "#!/bin/sh\n",
        "out=\"$1\"\n",
        "shift\n",
        "printf '%s\\n' \"$@\" > \"$out\"\n",
        "exit 7\n"
    );

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("butler", SimpleFileOptions::default().unix_permissions(0o755))
        .unwrap();
    writer.write_all(script.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn update_then_launch_forwards_args_and_exit_code() {
    let root = TempDir::new().unwrap();
    let marker = root.path().join("butler-version.txt");
    std::fs::write(&marker, "0.9.0").unwrap();

    let launcher = Launcher::new(
        VersionStore::new(marker.clone()),
        ManagedInstallation::new(root.path().join("butler")),
        ScriptedSource { latest_body: "1.0.0".to_string(), archive: fake_butler_release() },
        ChildProcess,
    );

    let out = root.path().join("recorded-args.txt");
    let args = vec![
        OsString::from(&out),
        OsString::from("push"),
        OsString::from("my game"),
    ];
    let code = launcher.run(&args).await.unwrap();

    // Child exit code propagated unchanged.
    assert_eq!(code, 7);

    // Marker reflects the new installation.
    assert_eq!(std::fs::read_to_string(&marker).unwrap(), "1.0.0");

    // The new executable is in place and ran with distinct arguments.
    assert!(root.path().join("butler").join("butler").exists());
    let recorded = std::fs::read_to_string(&out).unwrap();
    assert_eq!(recorded.lines().collect::<Vec<_>>(), vec!["push", "my game"]);
}

#[tokio::test]
async fn missing_installation_is_a_launch_error() {
    let root = TempDir::new().unwrap();

    // Remote serves a version but a corrupt archive, so no installation ever
    // appears; the launch must fail loudly.
    let launcher = Launcher::new(
        VersionStore::new(root.path().join("butler-version.txt")),
        ManagedInstallation::new(root.path().join("butler")),
        ScriptedSource { latest_body: "1.0.0".to_string(), archive: b"not a zip".to_vec() },
        ChildProcess,
    );

    let err = launcher.run(&[]).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LauncherError>(),
        Some(LauncherError::ChildLaunch { .. })
    ));
}
