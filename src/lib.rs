// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Latest Release Versions Library
//!
//! This library selects, from the published releases of a repository, the
//! newest release overall plus the newest patch release of every older minor
//! line, ignoring anything below a minimum version. It also provides the
//! plumbing around that selection: release tag parsing, the repository list
//! reader and a GitHub release source.

pub mod error;
pub mod github;
pub mod input;
pub mod latest;
pub mod report;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use error::{Error, Result};
pub use github::{GitHubClient, ReleaseSource};
pub use input::{RepoSlug, Target, parse_targets, read_targets};
pub use latest::{filter_versions, latest_versions, max_per_minor, sort_descending};
pub use report::{OutputFormat, RepoReport, build_report};
pub use version::{MinorLine, SkippedTag, Version, parse_tag, parse_tags};
