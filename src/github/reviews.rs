use std::collections::HashMap;

use super::types::{ReviewNode, ReviewRequestNode};
use crate::model::{RequestedReview, Review};

const GHOST_LOGIN: &str = "ghost";

/// Group a pull request's reviews under the teams they were filed for.
///
/// Requested teams come first, in request order, followed by teams that
/// reviewed without being asked, in the order they first appear. A review
/// on behalf of several teams is recorded once under each of them.
/// Requests for individual reviewers are ignored.
pub fn aggregate_reviews(
    requests: &[ReviewRequestNode],
    reviews: &[ReviewNode],
) -> Vec<RequestedReview> {
    let mut requested: Vec<RequestedReview> = Vec::new();
    let mut index_by_slug: HashMap<String, usize> = HashMap::new();

    let mut entry_for = |slug: &str, requested: &mut Vec<RequestedReview>| -> usize {
        *index_by_slug.entry(slug.to_string()).or_insert_with(|| {
            requested.push(RequestedReview::new(slug));
            requested.len() - 1
        })
    };

    for slug in requests.iter().filter_map(ReviewRequestNode::team_slug) {
        entry_for(slug, &mut requested);
    }

    for review in reviews {
        let reviewer = review
            .author
            .as_ref()
            .map_or(GHOST_LOGIN, |author| author.login.as_str());
        for team in &review.on_behalf_of.nodes {
            let idx = entry_for(&team.slug, &mut requested);
            requested[idx]
                .received_reviews
                .push(Review::new(reviewer, review.state));
        }
    }

    requested
}
