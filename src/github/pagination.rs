//! Round-based draining of paginated status check rollups.

use futures::future::try_join_all;
use serde_json::json;

use super::client::QueryClient;
use super::error::GraphQlError;
use super::queries::ROLLUP_PAGINATION;
use super::types::{RollupNode, RollupPaginationResponse};
use super::{query, variables};
use crate::model::{PullRequest, Status};

/// The next page still owed to one pull request's rollup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub rollup_id: String,
    pub cursor: String,
    /// Index of the owning pull request in the slice being drained.
    pub owner: usize,
}

impl Continuation {
    /// The continuation following `rollup`'s current page, if it has one.
    pub fn after(rollup: &RollupNode, owner: usize) -> Option<Self> {
        let page_info = &rollup.contexts.page_info;
        if !page_info.has_next_page {
            return None;
        }
        match &page_info.end_cursor {
            Some(cursor) => Some(Self {
                rollup_id: rollup.id.clone(),
                cursor: cursor.clone(),
                owner,
            }),
            None => {
                tracing::debug!(rollup_id = %rollup.id, "next page reported without a cursor");
                None
            }
        }
    }
}

/// Append a rollup page to its pull request and return the continuation for
/// the page after it.
pub fn absorb_page(
    pull_requests: &mut [PullRequest],
    owner: usize,
    rollup: RollupNode,
) -> Option<Continuation> {
    let next = Continuation::after(&rollup, owner);
    pull_requests[owner]
        .statuses
        .extend(rollup.contexts.nodes.into_iter().map(Status::from));
    next
}

async fn fetch_page<C: QueryClient + ?Sized>(
    client: &C,
    continuation: &Continuation,
) -> Result<Option<RollupNode>, GraphQlError> {
    let response: RollupPaginationResponse = query(
        client,
        ROLLUP_PAGINATION,
        variables([
            ("rollupId", json!(continuation.rollup_id)),
            ("rollupCursor", json!(continuation.cursor)),
        ]),
    )
    .await?;
    Ok(response.node)
}

/// Fetch every remaining rollup page.
///
/// Each round requests the next page of every continuation in the frontier
/// at once and waits for all of them before appending pages and building the
/// next frontier, so pages of any single rollup are appended strictly in
/// order. A rollup that has disappeared ends its continuation quietly. The
/// first failed query aborts the drain.
pub async fn drain<C: QueryClient + ?Sized>(
    client: &C,
    pull_requests: &mut [PullRequest],
    mut frontier: Vec<Continuation>,
) -> Result<(), GraphQlError> {
    let mut round = 0;
    while !frontier.is_empty() {
        round += 1;
        tracing::debug!(round, pending = frontier.len(), "fetching status rollup pages");

        let pages = try_join_all(frontier.iter().map(|continuation| fetch_page(client, continuation)))
            .await?;

        let mut next = Vec::with_capacity(frontier.len());
        for (continuation, page) in frontier.into_iter().zip(pages) {
            match page {
                Some(rollup) => next.extend(absorb_page(pull_requests, continuation.owner, rollup)),
                None => tracing::debug!(
                    rollup_id = %continuation.rollup_id,
                    "status rollup no longer exists"
                ),
            }
        }
        frontier = next;
    }
    Ok(())
}
