use anyhow::{Context, Result};
use std::time::Instant;

use crate::github::{PullRequestLocator, QueryClient, Targets};
use crate::model::PullRequest;

/// Locate every targeted pull request with its builds and reviews.
///
/// Called once per run, and once per round in --wait mode.
pub async fn fetch_pull_requests<C: QueryClient>(
    locator: &PullRequestLocator<C>,
    targets: &Targets,
) -> Result<Vec<PullRequest>> {
    let start = Instant::now();
    tracing::debug!(
        repos = targets.repos.len(),
        pulls = targets.pulls.len(),
        "fetching pull requests"
    );

    let pull_requests = locator
        .locate(targets)
        .await
        .context("Failed to fetch pull requests from GitHub")?;

    tracing::debug!(
        found = pull_requests.len(),
        builds = pull_requests.iter().map(PullRequest::total_build_count).sum::<usize>(),
        elapsed = ?start.elapsed(),
        "fetched pull requests"
    );
    Ok(pull_requests)
}
