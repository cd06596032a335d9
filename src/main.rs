// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Latest Release Versions (latestver) - Main Application
//!
//! Reads a list of GitHub repositories with a minimum version each, lists
//! their releases and prints the newest release of every minor line at or
//! above that minimum.
//!
//! The application supports:
//! - A CSV repository list or a single `--repo`/`--min-version` pair
//! - Text or JSON output
//! - A configurable API endpoint (e.g. GitHub Enterprise)

mod cli;

use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use log::debug;

use cli::{Cli, Format};
use latestver::github::{API_URL_ENV, GITHUB_API_URL};
use latestver::{
    GitHubClient, OutputFormat, ReleaseSource, RepoSlug, Target, Version, build_report,
    read_targets,
};

/// Main application entry point
///
/// Parses command line arguments and dispatches to the file or single
/// repository handler, printing any error to stderr.
fn main() {
    let cli = Cli::parse();

    // Handle completion generation first (exits immediately)
    if cli.completion.is_some() {
        print_bash_completion();
        return;
    }

    init_logging(cli.verbose);

    let api_url = resolve_api_url(cli.api_url.as_deref());
    debug!("Using API at {api_url}");

    let client = GitHubClient::new(api_url)
        .with_per_page(cli.per_page)
        .with_insecure(cli.insecure);
    let format = output_format(cli.format);

    // Note: clap makes --repo and FILE mutually exclusive and pairs --repo with --min-version
    let result = match (cli.repo, cli.min_version, cli.file) {
        (Some(repo), Some(min_version), _) => cmd_single(&client, &repo, &min_version, format),
        (_, _, Some(path)) => cmd_file(&client, &path, format),
        _ => Err("latestver: missing input file\nTry 'latestver --help' for more information.".into()),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbose flag
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,latestver=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Resolve the API base URL: flag, then environment, then public GitHub
fn resolve_api_url(flag: Option<&str>) -> String {
    flag.map(String::from)
        .or_else(|| std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| GITHUB_API_URL.to_string())
}

fn output_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
    }
}

// =============================================================================
// Command Implementation Functions
// =============================================================================

/// Report on every repository of a CSV list, in file order
///
/// Output is printed as each repository completes; the first failing
/// repository stops the run.
fn cmd_file(
    source: &impl ReleaseSource,
    path: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let targets =
        read_targets(path).map_err(|e| format!("latestver: {}: {e}", path.display()))?;

    debug!("Read {} repositories from {}", targets.len(), path.display());

    for target in &targets {
        print_report(source, target, format)?;
    }
    Ok(())
}

/// Report on one repository given on the command line
fn cmd_single(
    source: &impl ReleaseSource,
    repo: &str,
    min_version: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let repository: RepoSlug = repo.parse().map_err(|e| format!("latestver: {e}"))?;
    let min_version = Version::parse(min_version).map_err(|e| format!("latestver: {e}"))?;

    print_report(
        source,
        &Target {
            repository,
            min_version,
        },
        format,
    )
}

fn print_report(
    source: &impl ReleaseSource,
    target: &Target,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let report = build_report(source, target)
        .map_err(|e| format!("latestver: {}: {e}", target.repository))?;
    println!("{}", report.render(format)?);
    Ok(())
}

/// Print bash completion script
fn print_bash_completion() {
    print!(
        r#"# bash completion for latestver

_latestver_completions() {{
    local cur prev
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"

    case "${{prev}}" in
        -f|--format)
            COMPREPLY=($(compgen -W "text json" -- "${{cur}}"))
            return
            ;;
        -r|--repo|-m|--min-version|--api-url|--per-page|--completion)
            return
            ;;
    esac

    if [[ "${{cur}}" == -* ]]; then
        local options=(
            "--api-url       (GitHub API base URL)"
            "--completion    (Generate shell completion script)"
            "-f              (Output format: text or json)"
            "--format        (Output format: text or json)"
            "-h              (Print help)"
            "--help          (Print help)"
            "--insecure      (Skip TLS certificate verification)"
            "-k              (Skip TLS certificate verification)"
            "-m              (Oldest version of interest for --repo)"
            "--min-version   (Oldest version of interest for --repo)"
            "--per-page      (Releases requested per page)"
            "-r              (Report on a single repository)"
            "--repo          (Report on a single repository)"
            "-v              (Make the operation more talkative)"
            "--verbose       (Make the operation more talkative)"
            "--version       (Print version)"
        )

        local IFS=$'\n'
        local opt name padded
        local width=$((COLUMNS - 1))
        for opt in "${{options[@]}}"; do
            name="${{opt%%  *}}"
            if [[ "$name" == "${{cur}}"* ]]; then
                printf -v padded "%-${{width}}s" "$opt"
                COMPREPLY+=("$padded")
            fi
        done

        if ((${{#COMPREPLY[@]}} == 1)); then
            COMPREPLY[0]="${{COMPREPLY[0]%%  *}}"
        fi
    else
        COMPREPLY=($(compgen -f -- "${{cur}}"))
    fi
}}

complete -o nosort -F _latestver_completions latestver
"#
    );
}
