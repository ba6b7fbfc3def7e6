//! Fixed names for the launcher's on-disk state.
//!
//! Both entries are resolved relative to the directory containing the
//! launcher binary, never relative to the working directory.

/// Marker file recording the installed butler version as plain text.
pub const VERSION_MARKER_FILE: &str = "butler-version.txt";

/// Directory holding the unpacked butler release.
pub const INSTALL_DIR_NAME: &str = "butler";

/// Name of the managed executable inside [`INSTALL_DIR_NAME`] (without the
/// platform suffix).
pub const MANAGED_EXECUTABLE: &str = "butler";
