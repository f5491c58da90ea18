use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use dependawhat::services::get_github_token;
use dependawhat::{check_repositories, render_report, render_summary, Config, GithubClient};

/// Read-only checker for open Dependabot pull requests.
///
/// Lists open Dependabot PRs across repositories with their CI status and
/// whether the deny lists would skip them. Never approves, recreates or
/// closes anything.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Config file (default is $HOME/.dependawhat/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub token (defaults to USER_GITHUB_TOKEN, then `gh auth token`)
    #[arg(long, global = true)]
    github_token: Option<String>,

    /// Packages to deny, added to the global deny list
    #[arg(long, value_delimiter = ',', global = true)]
    deny_packages: Vec<String>,

    /// Organizations to deny, added to the global deny list
    #[arg(long, value_delimiter = ',', global = true)]
    deny_orgs: Vec<String>,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for open Dependabot PRs across repositories
    ///
    /// Without arguments, checks every repository in the `repositories`
    /// section of the config file.
    Check {
        /// Repositories as owner/repo
        repos: Vec<String>,

        /// Maximum number of concurrent GitHub requests
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (mut config, config_path) = Config::load(cli.config.as_deref())?;
    if let Some(path) = &config_path {
        eprintln!("{}", config_notice(path));
    }
    config.extend_global(&cli.deny_packages, &cli.deny_orgs);

    match cli.command {
        Commands::Check { repos, concurrency } => {
            if concurrency.is_some() {
                config.concurrency = concurrency;
            }

            let (token, repos) = prepare_check(
                &config,
                cli.github_token.as_deref(),
                repos,
                |var| std::env::var(var).ok(),
                get_github_token,
            )?;
            let client = GithubClient::new(token)?;

            let reports = check_repositories(&client, &config, &repos).await;
            print!("{}", render_report(&reports));
            println!("{}", render_summary(&reports));
        }
    }

    Ok(())
}

fn config_notice(path: &Path) -> String {
    format!("Using config file: {}", path.display())
}

/// Token and repositories for a check run. The token is resolved first so a
/// missing token is reported even when no repositories are given.
fn prepare_check<E, G>(
    config: &Config,
    flag: Option<&str>,
    repos: Vec<String>,
    env: E,
    gh: G,
) -> Result<(String, Vec<String>)>
where
    E: Fn(&str) -> Option<String>,
    G: FnOnce() -> Result<String>,
{
    let token = resolve_token(config, flag, env, gh)?;
    let repos = select_repositories(config, repos)?;
    Ok((token, repos))
}

/// Token from flag, environment or config, falling back to `gh`.
fn resolve_token<E, G>(config: &Config, flag: Option<&str>, env: E, gh: G) -> Result<String>
where
    E: Fn(&str) -> Option<String>,
    G: FnOnce() -> Result<String>,
{
    if let Some(token) = config.token_from(flag, env) {
        return Ok(token);
    }

    match gh() {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => anyhow::bail!(
            "GitHub token not provided. Use --github-token flag or set USER_GITHUB_TOKEN environment variable"
        ),
    }
}

/// Repositories named on the command line, else those in the config.
fn select_repositories(config: &Config, args: Vec<String>) -> Result<Vec<String>> {
    let repos = if args.is_empty() {
        config.configured_repositories()
    } else {
        args
    };
    if repos.is_empty() {
        anyhow::bail!(
            "no repositories specified. Use command-line arguments or configure repositories in config file"
        );
    }
    Ok(repos)
}
