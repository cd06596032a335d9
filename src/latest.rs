// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Selection of the latest relevant versions of a repository
//!
//! Given every published version and a minimum version, the selection keeps
//! the newest release of each minor line at or above the minimum, newest first.
//! The three steps are exposed separately so callers can reuse them.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::version::{MinorLine, Version};

/// Keep only versions that are not below `min_version`
///
/// Input order is preserved.
///
/// # Examples
/// ```
/// use latestver::latest::filter_versions;
/// use latestver::version::Version;
///
/// let kept = filter_versions(
///     vec![Version::new(1, 7, 14), Version::new(1, 8, 0), Version::new(1, 9, 5)],
///     &Version::new(1, 8, 0),
/// );
/// assert_eq!(kept, vec![Version::new(1, 8, 0), Version::new(1, 9, 5)]);
/// ```
pub fn filter_versions<I>(versions: I, min_version: &Version) -> Vec<Version>
where
    I: IntoIterator<Item = Version>,
{
    versions.into_iter().filter(|v| v >= min_version).collect()
}

/// Reduce each minor line to its highest version
///
/// The order of the returned versions is unspecified; run
/// [`sort_descending`] for a deterministic order.
pub fn max_per_minor<I>(versions: I) -> Vec<Version>
where
    I: IntoIterator<Item = Version>,
{
    let mut max_by_line: HashMap<MinorLine, Version> = HashMap::new();

    for version in versions {
        match max_by_line.entry(version.minor_line()) {
            Entry::Occupied(mut slot) => {
                if *slot.get() < version {
                    slot.insert(version);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(version);
            }
        }
    }

    max_by_line.into_values().collect()
}

/// Sort versions from highest to lowest
///
/// The sort is stable, so value-equal entries keep their relative order.
pub fn sort_descending(mut versions: Vec<Version>) -> Vec<Version> {
    versions.sort_by(|a, b| b.cmp(a));
    versions
}

/// The latest relevant versions of a repository
///
/// Returns the highest version of every minor line that is not below
/// `min_version`, highest first. The first element, if any, is the highest
/// version at or above `min_version`.
///
/// # Examples
/// ```
/// use latestver::latest::latest_versions;
/// use latestver::version::Version;
///
/// let releases = ["1.8.11", "1.9.6", "1.10.1", "1.9.5", "1.8.10", "1.10.0", "1.7.14"]
///     .iter()
///     .map(|s| Version::parse(s).unwrap());
/// let latest = latest_versions(releases, &Version::new(1, 8, 0));
/// let shown: Vec<String> = latest.iter().map(ToString::to_string).collect();
/// assert_eq!(shown, ["1.10.1", "1.9.6", "1.8.11"]);
/// ```
pub fn latest_versions<I>(releases: I, min_version: &Version) -> Vec<Version>
where
    I: IntoIterator<Item = Version>,
{
    sort_descending(max_per_minor(filter_versions(releases, min_version)))
}
