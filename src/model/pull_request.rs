use super::{RequestedReview, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub id: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub is_draft: bool,
    /// Rollup entries in page order; only ever appended to.
    pub statuses: Vec<Status>,
    pub requested_reviews: Vec<RequestedReview>,
}

impl PullRequest {
    /// Repository coordinate in "owner/name" form
    pub fn nwo(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }

    /// Return a short reference in the format "owner/repo#123"
    pub fn short_ref(&self) -> String {
        format!("{}#{}", self.nwo(), self.number)
    }

    pub fn is_ready_to_go(&self) -> bool {
        !self.is_draft && self.builds_are_ready() && self.reviews_are_ready()
    }

    /// True when every build finished without failing (and when there are none).
    pub fn builds_are_ready(&self) -> bool {
        self.statuses
            .iter()
            .all(|status| status.is_completed() && !status.is_failed())
    }

    pub fn ok_build_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| status.is_success() || status.is_neutral())
            .count()
    }

    pub fn total_build_count(&self) -> usize {
        self.statuses.len()
    }

    /// True when every requested team is satisfied and at least one approved.
    /// A pull request with no requested reviews is never ready.
    pub fn reviews_are_ready(&self) -> bool {
        self.requested_reviews.iter().all(RequestedReview::is_fulfilled)
            && self.requested_reviews.iter().any(RequestedReview::has_approval)
    }

    pub fn ok_review_count(&self) -> usize {
        self.requested_reviews
            .iter()
            .filter(|req| req.is_fulfilled())
            .count()
    }

    pub fn total_review_count(&self) -> usize {
        self.requested_reviews.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CheckConclusionState, CheckRunStatus, CheckStatusState, ContextStatus, Review, ReviewState,
        StatusState,
    };

    fn sample_pr() -> PullRequest {
        PullRequest {
            id: "PR_1".to_string(),
            repo_owner: "owner".to_string(),
            repo_name: "repo".to_string(),
            number: 123,
            title: "Fix login bug".to_string(),
            url: "https://github.com/owner/repo/pull/123".to_string(),
            is_draft: false,
            statuses: vec![],
            requested_reviews: vec![],
        }
    }

    fn check_run(status: CheckStatusState, conclusion: Option<CheckConclusionState>) -> Status {
        Status::CheckRun(CheckRunStatus {
            url: "https://github.com/owner/repo/runs/1".to_string(),
            suite_name: "Actions".to_string(),
            run_name: "test".to_string(),
            status,
            conclusion,
        })
    }

    fn context(state: StatusState) -> Status {
        Status::Context(ContextStatus {
            url: "https://ci.example.com/1".to_string(),
            context: "ci".to_string(),
            state,
        })
    }

    fn requested(team: &str, states: &[ReviewState]) -> RequestedReview {
        let mut req = RequestedReview::new(team);
        for state in states {
            req.received_reviews.push(Review::new("someone", *state));
        }
        req
    }

    fn ready_pr() -> PullRequest {
        let mut pr = sample_pr();
        pr.statuses = vec![
            check_run(CheckStatusState::Completed, Some(CheckConclusionState::Success)),
            context(StatusState::Success),
        ];
        pr.requested_reviews = vec![requested("team", &[ReviewState::Approved])];
        pr
    }

    #[test]
    fn test_refs() {
        let pr = sample_pr();
        assert_eq!(pr.nwo(), "owner/repo");
        assert_eq!(pr.short_ref(), "owner/repo#123");
    }

    #[test]
    fn test_builds_ready_without_statuses() {
        assert!(sample_pr().builds_are_ready());
    }

    #[test]
    fn test_builds_not_ready_while_pending() {
        let mut pr = sample_pr();
        pr.statuses = vec![
            context(StatusState::Success),
            check_run(CheckStatusState::InProgress, None),
        ];
        assert!(!pr.builds_are_ready());
    }

    #[test]
    fn test_builds_not_ready_when_failed() {
        let mut pr = sample_pr();
        pr.statuses = vec![context(StatusState::Error)];
        assert!(!pr.builds_are_ready());
    }

    #[test]
    fn test_unclassified_completed_build_counts_as_ready() {
        let mut pr = sample_pr();
        pr.statuses = vec![check_run(
            CheckStatusState::Completed,
            Some(CheckConclusionState::Skipped),
        )];
        assert!(pr.builds_are_ready());
        assert_eq!(pr.ok_build_count(), 0);
    }

    #[test]
    fn test_ok_build_count() {
        let mut pr = sample_pr();
        pr.statuses = vec![
            check_run(CheckStatusState::Completed, Some(CheckConclusionState::Success)),
            check_run(CheckStatusState::Completed, Some(CheckConclusionState::Neutral)),
            check_run(CheckStatusState::Completed, Some(CheckConclusionState::Failure)),
            check_run(CheckStatusState::Queued, None),
            context(StatusState::Success),
        ];
        assert_eq!(pr.ok_build_count(), 3);
        assert_eq!(pr.total_build_count(), 5);
    }

    #[test]
    fn test_reviews_not_ready_without_requests() {
        assert!(!sample_pr().reviews_are_ready());
    }

    #[test]
    fn test_reviews_require_an_approval() {
        let mut pr = sample_pr();
        pr.requested_reviews = vec![requested("a", &[ReviewState::Dismissed])];
        assert!(!pr.reviews_are_ready());

        pr.requested_reviews
            .push(requested("b", &[ReviewState::Approved]));
        assert!(pr.reviews_are_ready());
        assert_eq!(pr.ok_review_count(), 2);
    }

    #[test]
    fn test_reviews_not_ready_with_unfulfilled_team() {
        let mut pr = sample_pr();
        pr.requested_reviews = vec![
            requested("a", &[ReviewState::Approved]),
            requested("b", &[ReviewState::Commented]),
        ];
        assert!(!pr.reviews_are_ready());
        assert_eq!(pr.ok_review_count(), 1);
        assert_eq!(pr.total_review_count(), 2);
    }

    #[test]
    fn test_ready_to_go() {
        assert!(ready_pr().is_ready_to_go());
    }

    #[test]
    fn test_draft_is_never_ready_to_go() {
        let mut pr = ready_pr();
        pr.is_draft = true;
        assert!(!pr.is_ready_to_go());
    }
}
