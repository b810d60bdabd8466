mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::github::{Targets, DEFAULT_API_URL};
use crate::model::{PullRequestRef, RepoName};

pub const DEFAULT_BUILDS_TO_SHOW: usize = 5;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Environment variable naming the current repository (set by GitHub Actions)
pub const ENV_REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

/// Get the config directory path (~/.config/pr-status/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("pr-status"))
}

/// Get the default config file path (~/.config/pr-status/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/pr-status/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly named config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error; defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(path) => (path, true),
        None => match get_config_path() {
            Some(path) => (path, false),
            None => return Ok(Config::default()),
        },
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Values given on the command line, which win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repos: Vec<String>,
    pub pulls: Vec<String>,
    pub api_url: Option<String>,
    pub builds_to_show: Option<usize>,
    pub poll_interval: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub targets: Targets,
    pub api_url: String,
    pub builds_to_show: usize,
    pub poll_interval: Duration,
}

fn parse_all<T>(values: &[String]) -> Result<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    values
        .iter()
        .map(|value| value.parse::<T>().map_err(anyhow::Error::from))
        .collect()
}

/// Merge command line overrides, the environment and the config file.
///
/// Repositories and pull requests from the command line replace the ones in
/// the file. When neither names anything, `env_repository` (the value of
/// `GITHUB_REPOSITORY`) selects the repository to search.
pub fn resolve(config: Config, overrides: Overrides, env_repository: Option<String>) -> Result<Settings> {
    let (mut repos, pulls) = if overrides.repos.is_empty() && overrides.pulls.is_empty() {
        (config.repos, config.pulls)
    } else {
        (overrides.repos, overrides.pulls)
    };

    if repos.is_empty() && pulls.is_empty() {
        if let Some(repository) = env_repository.filter(|value| !value.trim().is_empty()) {
            repos.push(repository);
        }
    }

    let targets = Targets {
        repos: parse_all::<RepoName>(&repos)?,
        pulls: parse_all::<PullRequestRef>(&pulls)?,
    };

    let poll_interval = match overrides.poll_interval.or(config.poll_interval) {
        Some(interval) => humantime::parse_duration(&interval)
            .with_context(|| format!("Invalid poll interval \"{}\"", interval))?,
        None => DEFAULT_POLL_INTERVAL,
    };

    Ok(Settings {
        targets,
        api_url: overrides
            .api_url
            .or(config.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        builds_to_show: overrides
            .builds_to_show
            .or(config.builds_to_show)
            .unwrap_or(DEFAULT_BUILDS_TO_SHOW),
        poll_interval,
    })
}
