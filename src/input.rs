// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Repository list input
//!
//! The list is a small CSV file whose first line is a header, followed by one
//! `owner/repo,min_version` row per repository.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::version::Version;

/// A GitHub repository in `owner/repo` form
///
/// Parsing splits on the first `/`; both halves must be non-empty.
///
/// # Examples
/// ```
/// use latestver::input::RepoSlug;
///
/// let slug: RepoSlug = "kubernetes/kubernetes".parse().unwrap();
/// assert_eq!(slug.owner, "kubernetes");
/// assert!("kubernetes".parse::<RepoSlug>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

/// One repository to report on, with the oldest version of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub repository: RepoSlug,
    pub min_version: Version,
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepoSlug {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strip surrounding whitespace and one pair of double quotes from a field
fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
        .trim()
}

/// Parse the repository list
///
/// Blank lines are ignored anywhere, the first non-blank line is treated as
/// a header and skipped, and columns after the second are ignored.
///
/// # Errors
/// Returns [`Error::InvalidRow`] carrying the 1-based line number for a row
/// with fewer than two columns, a bad repository, or a bad minimum version
///
/// # Examples
/// ```
/// use latestver::input::parse_targets;
///
/// let targets = parse_targets("repo,min\ncoreos/etcd,3.4.0\n").unwrap();
/// assert_eq!(targets.len(), 1);
/// assert_eq!(targets[0].repository.to_string(), "coreos/etcd");
/// ```
pub fn parse_targets(content: &str) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    let rows = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1);

    for (index, line) in rows {
        let line_number = index + 1;

        let mut fields = line.split(',').map(unquote);
        let (Some(repository), Some(min_version)) = (fields.next(), fields.next()) else {
            return Err(Error::InvalidRow {
                line: line_number,
                message: format!("expected owner/repo,min_version but got {line:?}"),
            });
        };

        let repository = repository.parse::<RepoSlug>().map_err(|e| Error::InvalidRow {
            line: line_number,
            message: e.to_string(),
        })?;
        let min_version = Version::parse(min_version).map_err(|e| Error::InvalidRow {
            line: line_number,
            message: e.to_string(),
        })?;

        targets.push(Target {
            repository,
            min_version,
        });
    }

    Ok(targets)
}

/// Read and parse the repository list at `path`
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, or any error of [`parse_targets`]
pub fn read_targets(path: &Path) -> Result<Vec<Target>> {
    let content = fs::read_to_string(path)?;
    parse_targets(&content)
}
