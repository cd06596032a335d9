// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Per-repository reports and their rendering

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::github::ReleaseSource;
use crate::input::{RepoSlug, Target};
use crate::latest::latest_versions;
use crate::version::{SkippedTag, Version, parse_tags};

/// How reports are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per repository
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Latest relevant versions of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReport {
    pub repository: RepoSlug,
    pub min_version: Version,
    /// Highest version of each minor line, highest first
    pub latest: Vec<Version>,
    /// Tags that were not versions
    pub skipped: Vec<SkippedTag>,
}

/// List the releases of `target` and select its latest versions
///
/// # Errors
/// Returns an error if the release source fails; unparseable tags are
/// skipped and recorded in [`RepoReport::skipped`]
pub fn build_report<S: ReleaseSource + ?Sized>(source: &S, target: &Target) -> Result<RepoReport> {
    let tags = source.release_tags(&target.repository)?;
    let (versions, skipped) = parse_tags(&tags);
    let latest = latest_versions(versions, &target.min_version);

    info!(
        "{}: {} tag(s), {} skipped, {} minor line(s) at or above {}",
        target.repository,
        tags.len(),
        skipped.len(),
        latest.len(),
        target.min_version
    );

    Ok(RepoReport {
        repository: target.repository.clone(),
        min_version: target.min_version.clone(),
        latest,
        skipped,
    })
}

impl RepoReport {
    /// Render the report in the requested format, without a trailing newline
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }

    /// `latest versions of owner/repo: [1.10.1 1.9.6 1.8.11]`
    #[must_use]
    pub fn to_text(&self) -> String {
        let versions: Vec<String> = self.latest.iter().map(ToString::to_string).collect();
        format!("latest versions of {}: [{}]", self.repository, versions.join(" "))
    }
}
