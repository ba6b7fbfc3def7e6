//! Core types shared across the launcher.
//!
//! Currently this is the error taxonomy: a strongly-typed [`LauncherError`]
//! for the failure modes the flow distinguishes, plus the user-facing
//! rendering used by the binary entry point.

pub mod error;

pub use error::{ErrorContext, LauncherError, user_friendly_error};
