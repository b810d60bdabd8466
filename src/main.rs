use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use pr_status::config::{Overrides, Settings, ENV_REPOSITORY_VAR};
use pr_status::github::{GraphQlClient, GraphQlError, PullRequestLocator};
use pr_status::output::FormatOptions;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[0f";

#[derive(Parser, Debug)]
#[command(name = "pr-status")]
#[command(about = "Build and review status of your open GitHub pull requests", long_about = None)]
#[command(version)]
struct Cli {
    /// GitHub access token (defaults to $GH_GH_PAT or $GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Repository to search for your open pull requests, as owner/name (repeatable)
    #[arg(short, long = "repo", value_name = "OWNER/NAME")]
    repos: Vec<String>,

    /// Pull request to include, as owner/name#123 or URL (repeatable)
    #[arg(short, long = "pull", value_name = "PULL")]
    pulls: Vec<String>,

    /// Keep refreshing until interrupted
    #[arg(short, long)]
    wait: bool,

    /// Show every build and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pr-status/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Maximum number of builds listed per pull request
    #[arg(long)]
    builds: Option<usize>,

    /// Delay between refreshes in --wait mode, e.g. "30s"
    #[arg(long)]
    interval: Option<String>,

    /// GraphQL endpoint, for GitHub Enterprise
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            repos: self.repos.clone(),
            pulls: self.pulls.clone(),
            api_url: self.api_url.clone(),
            builds_to_show: self.builds,
            poll_interval: self.interval.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "pr_status=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<GraphQlError>() {
        Some(graphql) if graphql.is_unauthorized() => EXIT_AUTH,
        _ => EXIT_NETWORK,
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config = pr_status::config::load_config(cli.config.as_ref().map(PathBuf::from))?;
    pr_status::config::resolve(config, cli.overrides(), std::env::var(ENV_REPOSITORY_VAR).ok())
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(?settings, "resolved settings");

    let token = match pr_status::credentials::get_token(cli.token.clone()) {
        Ok(token) => token,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let client = match GraphQlClient::new(settings.api_url.clone(), token) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };
    let locator = PullRequestLocator::new(client);

    let options = FormatOptions {
        verbose: cli.verbose,
        builds_to_show: settings.builds_to_show,
        use_colors: pr_status::output::should_use_colors(),
    };

    loop {
        let start_time = Instant::now();
        let pull_requests =
            match pr_status::fetch::fetch_pull_requests(&locator, &settings.targets).await {
                Ok(pull_requests) => pull_requests,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(exit_code_for(&e));
                }
            };

        if cli.wait {
            print!("{}", CLEAR_SCREEN);
            println!(
                "{}\n",
                pr_status::output::format_header(
                    &chrono::Local::now(),
                    locator.client().rate_limit(),
                    options.use_colors
                )
            );
        }
        println!(
            "{}",
            pr_status::output::format_pull_requests(&pull_requests, &options)
        );
        tracing::debug!(
            total = pull_requests.len(),
            elapsed = ?start_time.elapsed(),
            "round complete"
        );

        if !cli.wait {
            break;
        }
        tokio::time::sleep(settings.poll_interval).await;
    }

    std::process::exit(EXIT_SUCCESS);
}
