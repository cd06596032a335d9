// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for latestver
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the per-repository reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// latest versions of owner/repo: [1.10.1 1.9.6]
    #[default]
    Text,
    /// One JSON object per repository
    Json,
}

/// CLI argument parser - bools required for clap flag parsing
#[derive(Parser)]
#[command(
    name = "latestver",
    version,
    about = "Latest patch release of every minor line of GitHub repositories",
    disable_version_flag = true
)]
#[command(arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")))]
pub struct Cli {
    /// CSV file with a header line and owner/repo,min_version rows
    #[arg(value_name = "FILE", conflicts_with = "repo")]
    pub file: Option<PathBuf>,

    /// Report on a single repository instead of reading a file
    #[arg(short = 'r', long = "repo", value_name = "OWNER/REPO", requires = "min_version")]
    pub repo: Option<String>,

    /// Oldest version of interest for --repo
    #[arg(short = 'm', long = "min-version", value_name = "VERSION", requires = "repo")]
    pub min_version: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// GitHub API base URL (default: $LATESTVER_API_URL or https://api.github.com)
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Releases requested per page (1-100)
    #[arg(long = "per-page", value_name = "N", default_value_t = 100)]
    pub per_page: u32,

    /// Allow insecure TLS connections (skip certificate verification)
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion script (only bash is supported currently)
    #[arg(long = "completion", value_name = "SHELL", value_parser = parse_completion_shell)]
    pub completion: Option<String>,
}

fn parse_completion_shell(s: &str) -> Result<String, String> {
    match s.to_lowercase().as_str() {
        "bash" => Ok(s.to_lowercase()),
        _ => Err(format!("unsupported shell: {s} (only 'bash' is supported)")),
    }
}
