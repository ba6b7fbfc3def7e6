//! Dotted numeric version parsing and ordering.
//!
//! butler releases are identified by dotted numeric strings like `15.21.0`.
//! These are not semver: the number of components is unbounded and carries no
//! major/minor/patch meaning, so comparison is plain component-wise numeric
//! ordering with missing trailing components treated as zero (`2.1` equals
//! `2.1.0`, and `2.10` is newer than `2.9`).
//!
//! A dedicated [`Version::Unknown`] sentinel stands in for "no usable version
//! information" - a missing or corrupt marker file, or an unparseable remote
//! body. It orders strictly below every release, including `0.0.0`, which is
//! what forces an update whenever the installed version cannot be trusted.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a version string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version string: {input:?}")]
pub struct ParseVersionError {
    /// The rejected input.
    pub input: String,
}

/// A butler release version, or the unknown sentinel.
///
/// # Ordering
///
/// `Unknown` compares less than any release. Releases compare component-wise
/// numerically, padding the shorter side with zeros:
///
/// ```
/// use butler_launcher::version::Version;
///
/// let old: Version = "2.9".parse().unwrap();
/// let new: Version = "2.10".parse().unwrap();
/// assert!(new > old);
///
/// let a: Version = "2.1".parse().unwrap();
/// let b: Version = "2.1.0".parse().unwrap();
/// assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
///
/// assert!(Version::Unknown < "0.0.0".parse().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// No usable version information.
    Unknown,
    /// A parsed release with at least one numeric component.
    Release(Vec<u64>),
}

impl Version {
    /// Parse a version string, degrading any failure to [`Version::Unknown`].
    ///
    /// This is the boundary behavior the flow relies on: a garbage marker
    /// file or remote body never aborts the run, it just forces an update.
    #[must_use]
    pub fn parse_or_unknown(input: &str) -> Self {
        input.parse().unwrap_or(Self::Unknown)
    }

    /// Whether this is the unknown sentinel.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseVersionError { input: s.to_string() });
        }

        let components = trimmed
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseVersionError { input: s.to_string() })?;

        Ok(Self::Release(components))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Release(components) => {
                let mut first = true;
                for component in components {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{component}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unknown, Self::Unknown) => Ordering::Equal,
            (Self::Unknown, Self::Release(_)) => Ordering::Less,
            (Self::Release(_), Self::Unknown) => Ordering::Greater,
            (Self::Release(a), Self::Release(b)) => {
                // Pad the shorter side with zeros: "2.1" == "2.1.0".
                let len = a.len().max(b.len());
                for i in 0..len {
                    let lhs = a.get(i).copied().unwrap_or(0);
                    let rhs = b.get(i).copied().unwrap_or(0);
                    match lhs.cmp(&rhs) {
                        Ordering::Equal => {}
                        unequal => return unequal,
                    }
                }
                Ordering::Equal
            }
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
