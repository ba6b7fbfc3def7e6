//! butler-launcher - a self-updating launcher for the itch.io butler CLI
//!
//! This crate wraps the [butler](https://itch.io/docs/butler/) command-line
//! tool in a transparent launcher: it keeps a local copy of butler up to date
//! against the broth.itch.ovh release channels, then spawns butler with the
//! caller's arguments and exits with butler's own exit code.
//!
//! # Flow
//!
//! Every invocation walks the same strictly sequential path:
//!
//! ```text
//! resolve channel -> read version marker -> fetch remote LATEST
//!     -> (download + unpack if newer) -> rewrite marker
//!     -> spawn butler -> forward exit code
//! ```
//!
//! Update failures never block the launch: if the update server is
//! unreachable or an archive fails to unpack, the launcher logs a warning and
//! runs whatever installation is already on disk.
//!
//! # Core Modules
//!
//! - [`channel`] - Platform detection and release channel selection
//! - [`version`] - Dotted numeric version parsing and ordering
//! - [`store`] - The on-disk version marker file
//! - [`remote`] - The broth.itch.ovh release endpoints and update decision
//! - [`install`] - The managed installation directory and archive extraction
//! - [`runner`] - Child process spawning with inherited stdio
//! - [`updater`] - Orchestration of the whole update-then-launch flow
//! - [`cli`] - Command-line surface (argument-transparent by design)
//! - [`core`] - Error types shared across the crate
//!
//! # On-Disk Layout
//!
//! Both pieces of persistent state live next to the launcher binary:
//!
//! - `butler-version.txt` - the installed version marker
//! - `butler/` - the managed installation holding the butler executable

pub mod channel;
pub mod cli;
pub mod constants;
pub mod core;
pub mod install;
pub mod remote;
pub mod runner;
pub mod store;
pub mod updater;
pub mod version;
