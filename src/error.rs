// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types for tag parsing, input reading and release listing

use thiserror::Error;

/// Errors produced by the latestver library
#[derive(Debug, Error)]
pub enum Error {
    /// A version string is not `major.minor.patch[-pre][+build]`
    #[error("invalid version {input:?}: {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    /// A release tag was empty or only whitespace
    #[error("empty version tag")]
    EmptyTag,

    /// A repository is not in `owner/repo` form
    #[error("invalid repository {0:?} (expected owner/repo)")]
    InvalidRepository(String),

    /// A row of the repository list could not be read
    #[error("line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    /// The release API answered with a non-success status
    #[error("failed to list releases: {url} ({status})")]
    Api { url: String, status: u16 },

    /// The release API linked back to a page that was already fetched
    #[error("release pages loop back to {url}")]
    PageLoop { url: String },

    /// Transport failure talking to the release API
    #[error("request failed: {0}")]
    Http(#[from] attohttpc::Error),

    /// The release API returned a payload that is not a release list
    #[error("unexpected response from release API: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the repository list failed
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for latestver operations
pub type Result<T> = std::result::Result<T, Error>;
