//! multimerge CLI entry point

mod cli;

use clap::Parser;
use cli::style::Stylize;
use cli::{RunOptions, run_multimerge};
use multimerge::config::ConfigOverrides;
use multimerge::types::MergeMethod;
use std::path::PathBuf;
use std::process::ExitCode;

/// Approve and merge every open PR assigned to you whose diff matches an
/// exemplar PR
#[derive(Parser, Debug)]
#[command(name = "multimerge", version, about)]
struct Cli {
    /// Only consider PRs whose title starts with this (case-sensitive)
    title_prefix: String,

    /// Exemplar PR URL, e.g. <https://github.com/owner/repo/pull/123>
    example_pr: String,

    /// GitHub token (defaults to the `GITHUB_TOKEN` environment variable)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Merge method: squash, merge or rebase [default: squash]
    #[arg(long, value_name = "METHOD")]
    merge_method: Option<MergeMethod>,

    /// GitHub REST API root [default: <https://api.github.com>]
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Config file (defaults to <config dir>/multimerge/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Find and list matching PRs without approving or merging anything
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            title_prefix: cli.title_prefix,
            example_pr: cli.example_pr,
            token: cli.token,
            config_path: cli.config,
            overrides: ConfigOverrides {
                api_url: cli.api_url,
                merge_method: cli.merge_method,
                timeout_secs: cli.timeout,
            },
            dry_run: cli.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_multimerge(cli.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {e:#}", "Error:".error());
            ExitCode::FAILURE
        }
    }
}
