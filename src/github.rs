// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release listing from the GitHub REST API
//!
//! Releases are listed page by page, following the `Link` response header
//! until GitHub stops advertising a next page. A next link pointing back to a
//! page already fetched is an error.

use std::collections::HashSet;

use attohttpc::header::{ACCEPT, LINK, USER_AGENT};
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::input::RepoSlug;

/// Public GitHub API endpoint
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Environment variable overriding [`GITHUB_API_URL`]
pub const API_URL_ENV: &str = "LATESTVER_API_URL";

/// Largest page size the releases endpoint accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Anything that can list the release tags of a repository
pub trait ReleaseSource {
    /// All release tags of `repo`, in whatever order the source returns them
    ///
    /// # Errors
    /// Returns an error if the releases cannot be listed
    fn release_tags(&self, repo: &RepoSlug) -> Result<Vec<String>>;
}

/// Subset of the release payload we read
#[derive(Deserialize)]
struct Release {
    tag_name: String,
}

/// Blocking client for the GitHub releases endpoint
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_url: String,
    per_page: u32,
    insecure: bool,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(GITHUB_API_URL)
    }
}

impl GitHubClient {
    /// Create a client for the API rooted at `api_url`
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            per_page: MAX_PER_PAGE,
            insecure: false,
        }
    }

    /// Set the page size, clamped to `1..=100`
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Skip TLS certificate verification
    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// URL of the first page of releases for `repo`
    #[must_use]
    pub fn releases_url(&self, repo: &RepoSlug) -> String {
        format!(
            "{}/repos/{}/{}/releases?per_page={}",
            self.api_url, repo.owner, repo.name, self.per_page
        )
    }

    /// Fetch one page, returning its tags and the next page URL if any
    fn fetch_page(&self, url: &str) -> Result<(Vec<String>, Option<String>)> {
        debug!("Fetching releases from: {url}");

        let resp = attohttpc::get(url)
            .header(USER_AGENT, format!("latestver/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json")
            .danger_accept_invalid_certs(self.insecure)
            .send()?;

        if !resp.is_success() {
            return Err(Error::Api {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let next = resp
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_url);

        let releases: Vec<Release> = serde_json::from_str(&resp.text()?)?;
        let tags = releases.into_iter().map(|r| r.tag_name).collect();

        Ok((tags, next))
    }
}

impl ReleaseSource for GitHubClient {
    fn release_tags(&self, repo: &RepoSlug) -> Result<Vec<String>> {
        let mut tags = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.releases_url(repo));
        let mut pages = 0;

        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                return Err(Error::PageLoop { url });
            }
            let (page_tags, next_url) = self.fetch_page(&url)?;
            tags.extend(page_tags);
            next = next_url;
            pages += 1;
        }

        debug!("Listed {} release(s) of {repo} in {pages} page(s)", tags.len());
        Ok(tags)
    }
}

/// Extract the `rel="next"` target from a `Link` header
///
/// # Examples
/// ```
/// use latestver::github::next_page_url;
///
/// let header = r#"<https://api.github.com/repositories/1/releases?page=2>; rel="next", <https://api.github.com/repositories/1/releases?page=5>; rel="last""#;
/// assert_eq!(
///     next_page_url(header).as_deref(),
///     Some("https://api.github.com/repositories/1/releases?page=2")
/// );
/// assert_eq!(next_page_url(r#"<https://x/?page=1>; rel="prev""#), None);
/// ```
#[must_use]
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param
                .strip_prefix("rel=")
                .is_some_and(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(String::from)
    })
}
