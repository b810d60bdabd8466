//! Response shapes for the queries in [`super::queries`].

use serde::{Deserialize, Deserializer};

use crate::model::{
    CheckConclusionState, CheckRunStatus, CheckStatusState, ContextStatus, ReviewState, Status,
    StatusState,
};

/// GraphQL list items are nullable; null entries are dropped rather than
/// failing the whole response.
fn non_null_nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let nodes = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(nodes.into_iter().flatten().flatten().collect())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default = "Vec::new", deserialize_with = "non_null_nodes")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub search: Connection<PullRequestNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByNumberResponse {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RollupPaginationResponse {
    /// Absent once the rollup no longer exists.
    pub node: Option<RollupNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub id: String,
    pub is_draft: bool,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub base_repository: BaseRepository,
    pub reviews: Connection<ReviewNode>,
    pub review_requests: Connection<ReviewRequestNode>,
    pub commits: Connection<CommitNode>,
}

impl PullRequestNode {
    /// The status check rollup of the most recent commit, if CI reported any.
    pub fn take_rollup(&mut self) -> Option<RollupNode> {
        self.commits
            .nodes
            .last_mut()
            .and_then(|node| node.commit.status_check_rollup.take())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseRepository {
    pub name: String,
    pub owner: Actor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNode {
    /// Null for deleted accounts.
    pub author: Option<Actor>,
    pub state: ReviewState,
    pub on_behalf_of: Connection<TeamNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamNode {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequestNode {
    pub requested_reviewer: Option<RequestedReviewer>,
}

impl ReviewRequestNode {
    /// The team slug; `None` for individual reviewers.
    pub fn team_slug(&self) -> Option<&str> {
        self.requested_reviewer
            .as_ref()
            .and_then(|reviewer| reviewer.slug.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestedReviewer {
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitNode {
    pub commit: Commit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub status_check_rollup: Option<RollupNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RollupNode {
    pub id: String,
    pub contexts: ContextConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConnection {
    pub page_info: PageInfo,
    #[serde(default, deserialize_with = "non_null_nodes")]
    pub nodes: Vec<ContextNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum ContextNode {
    CheckRun(CheckRunNode),
    StatusContext(StatusContextNode),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRunNode {
    pub check_suite: Option<CheckSuite>,
    pub name: String,
    pub status: CheckStatusState,
    pub conclusion: Option<CheckConclusionState>,
    pub details_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckSuite {
    pub app: Option<App>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusContextNode {
    pub context: String,
    pub state: StatusState,
    pub target_url: Option<String>,
}

impl From<ContextNode> for Status {
    fn from(node: ContextNode) -> Self {
        match node {
            ContextNode::CheckRun(run) => Status::CheckRun(CheckRunStatus {
                url: run.details_url.unwrap_or_default(),
                suite_name: run
                    .check_suite
                    .and_then(|suite| suite.app)
                    .map(|app| app.name)
                    .unwrap_or_default(),
                run_name: run.name,
                status: run.status,
                conclusion: run.conclusion,
            }),
            ContextNode::StatusContext(context) => Status::Context(ContextStatus {
                url: context.target_url.unwrap_or_default(),
                context: context.context,
                state: context.state,
            }),
        }
    }
}
