// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Semantic versions of published releases
//!
//! This module provides the [`Version`] value compared by the selection logic,
//! the [`MinorLine`] key it is grouped by, and the tag parsing that turns raw
//! release tags (e.g. "v1.10.1-rc") into versions.

use std::fmt;
use std::str::FromStr;

use log::warn;
use semver::Prerelease;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A release version: `major.minor.patch` with an optional pre-release
///
/// Ordering follows semantic-versioning precedence. The numeric triple is
/// compared first; a version carrying a pre-release is lower than the same
/// triple without one, and pre-release identifiers compare one by one
/// (numeric identifiers numerically and below alphanumeric ones).
///
/// Build metadata is dropped on parse so it never affects equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
}

/// The `(major, minor)` pair shared by every release of a minor line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinorLine {
    pub major: u64,
    pub minor: u64,
}

/// A release tag that could not be turned into a [`Version`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTag {
    /// Tag exactly as the release source reported it
    pub tag: String,
    /// Why the tag was rejected
    pub reason: String,
}

impl Version {
    /// Create a release version without a pre-release
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
        }
    }

    /// Attach a pre-release (e.g. "rc.1") to this version
    ///
    /// # Errors
    /// Returns [`Error::InvalidVersion`] if `pre` is not a valid identifier sequence
    pub fn with_pre(self, pre: &str) -> Result<Self> {
        let pre = Prerelease::new(pre).map_err(|source| Error::InvalidVersion {
            input: format!("{self}-{pre}"),
            source,
        })?;
        Ok(Self { pre, ..self })
    }

    /// Parse a strict `major.minor.patch[-pre][+build]` version string
    ///
    /// # Errors
    /// Returns [`Error::InvalidVersion`] if the string is not a semantic version
    ///
    /// # Examples
    /// ```
    /// use latestver::version::Version;
    ///
    /// let v = Version::parse("1.10.1-rc").unwrap();
    /// assert_eq!((v.major, v.minor, v.patch), (1, 10, 1));
    /// assert!(v.is_prerelease());
    /// assert!(Version::parse("1.10").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = semver::Version::parse(input).map_err(|source| Error::InvalidVersion {
            input: input.to_string(),
            source,
        })?;
        Ok(Self {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: parsed.pre,
        })
    }

    /// The minor line this version belongs to
    #[must_use]
    pub const fn minor_line(&self) -> MinorLine {
        MinorLine {
            major: self.major,
            minor: self.minor,
        }
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for MinorLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse a release tag into a [`Version`]
///
/// Surrounding whitespace is ignored and a single leading `v` or `V` is
/// stripped before strict parsing.
///
/// # Errors
/// Returns [`Error::EmptyTag`] for an empty tag and [`Error::InvalidVersion`]
/// when what remains is not a semantic version
///
/// # Examples
/// ```
/// use latestver::version::{Version, parse_tag};
///
/// assert_eq!(parse_tag("v1.9.6").unwrap(), Version::new(1, 9, 6));
/// assert_eq!(parse_tag("2.2.1").unwrap(), Version::new(2, 2, 1));
/// assert!(parse_tag("").is_err());
/// assert!(parse_tag("release-2024").is_err());
/// ```
pub fn parse_tag(tag: &str) -> Result<Version> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyTag);
    }
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    Version::parse(stripped)
}

/// Parse every tag, keeping the ones that are versions
///
/// A bad tag never fails the batch: it is logged and returned in the second
/// half of the tuple so the caller can report it.
pub fn parse_tags<I, S>(tags: I) -> (Vec<Version>, Vec<SkippedTag>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut versions = Vec::new();
    let mut skipped = Vec::new();

    for tag in tags {
        let tag = tag.as_ref();
        match parse_tag(tag) {
            Ok(version) => versions.push(version),
            Err(e) => {
                warn!("Skipping tag {tag:?}: {e}");
                skipped.push(SkippedTag {
                    tag: tag.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (versions, skipped)
}
