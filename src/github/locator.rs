use futures::future::try_join_all;
use serde_json::{json, Value};

use super::client::QueryClient;
use super::error::GraphQlError;
use super::pagination::{absorb_page, drain, Continuation};
use super::queries::{PULL_REQUEST_BY_NUMBER, PULL_REQUEST_SEARCH};
use super::reviews::aggregate_reviews;
use super::types::{ByNumberResponse, PullRequestNode, SearchResponse};
use super::{query, variables};
use crate::model::{PullRequest, PullRequestRef, RepoName};

const BASE_SEARCH: &str = "is:pr author:@me state:open";

/// What a single locate call should resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub repos: Vec<RepoName>,
    pub pulls: Vec<PullRequestRef>,
}

impl Targets {
    /// The search runs when repositories were named, or when nothing was
    /// named at all (which searches every visible repository).
    pub fn searches_repositories(&self) -> bool {
        !self.repos.is_empty() || self.pulls.is_empty()
    }
}

/// Build the search predicate for open pull requests authored by the viewer.
pub fn search_predicate(repos: &[RepoName]) -> String {
    std::iter::once(BASE_SEARCH.to_string())
        .chain(repos.iter().map(|repo| format!("repo:{}", repo)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn pull request nodes into models, seeding the pagination frontier with
/// every rollup whose first page was not the last.
fn assemble(nodes: Vec<PullRequestNode>) -> (Vec<PullRequest>, Vec<Continuation>) {
    let mut pull_requests = Vec::with_capacity(nodes.len());
    let mut frontier = Vec::new();

    for (owner, mut node) in nodes.into_iter().enumerate() {
        let rollup = node.take_rollup();
        let requested_reviews = aggregate_reviews(&node.review_requests.nodes, &node.reviews.nodes);

        pull_requests.push(PullRequest {
            id: node.id,
            repo_owner: node.base_repository.owner.login,
            repo_name: node.base_repository.name,
            number: node.number,
            title: node.title,
            url: node.url,
            is_draft: node.is_draft,
            statuses: Vec::new(),
            requested_reviews,
        });

        if let Some(rollup) = rollup {
            frontier.extend(absorb_page(&mut pull_requests, owner, rollup));
        }
    }

    (pull_requests, frontier)
}

/// Finds pull requests and assembles their build and review status.
pub struct PullRequestLocator<C> {
    client: C,
}

impl<C: QueryClient> PullRequestLocator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Open pull requests authored by the viewer in `repos`, or in every
    /// repository visible to the token when `repos` is empty. Results keep
    /// the order returned by the search.
    pub async fn in_repositories(&self, repos: &[RepoName]) -> Result<Vec<PullRequest>, GraphQlError> {
        let search = search_predicate(repos);
        tracing::debug!(%search, "searching pull requests");

        let response: SearchResponse = query(
            &self.client,
            PULL_REQUEST_SEARCH,
            variables([("search", json!(search)), ("rollupCursor", Value::Null)]),
        )
        .await?;

        let (mut pull_requests, frontier) = assemble(response.search.nodes);
        tracing::debug!(
            found = pull_requests.len(),
            paginating = frontier.len(),
            "search returned pull requests"
        );
        drain(&self.client, &mut pull_requests, frontier).await?;
        Ok(pull_requests)
    }

    /// A single pull request, or `None` when the repository or pull request
    /// comes back null.
    ///
    /// github.com reports a missing pull request as `pullRequest: null`
    /// together with a `NOT_FOUND` entry in `errors`, which the client turns
    /// into [`GraphQlError::Query`]. Against that API a missing number is an
    /// error, and `None` only comes from endpoints that omit the entry.
    pub async fn by_number(&self, target: &PullRequestRef) -> Result<Option<PullRequest>, GraphQlError> {
        tracing::debug!(pull_request = %target, "looking up pull request");

        let response: ByNumberResponse = query(
            &self.client,
            PULL_REQUEST_BY_NUMBER,
            variables([
                ("owner", json!(target.repo.owner)),
                ("name", json!(target.repo.name)),
                ("number", json!(target.number)),
            ]),
        )
        .await?;

        let Some(node) = response.repository.and_then(|repo| repo.pull_request) else {
            tracing::debug!(pull_request = %target, "pull request not found");
            return Ok(None);
        };

        let (mut pull_requests, frontier) = assemble(vec![node]);
        drain(&self.client, &mut pull_requests, frontier).await?;
        Ok(pull_requests.pop())
    }

    /// Resolve the repository search and the explicit lookups concurrently.
    ///
    /// Search results come first, followed by each explicit pull request in
    /// the order requested; lookups that find nothing are skipped.
    pub async fn locate(&self, targets: &Targets) -> Result<Vec<PullRequest>, GraphQlError> {
        let search = async {
            if targets.searches_repositories() {
                self.in_repositories(&targets.repos).await
            } else {
                Ok(Vec::new())
            }
        };
        let lookups = try_join_all(targets.pulls.iter().map(|target| self.by_number(target)));

        let (mut pull_requests, explicit) = tokio::try_join!(search, lookups)?;
        pull_requests.extend(explicit.into_iter().flatten());
        Ok(pull_requests)
    }
}
