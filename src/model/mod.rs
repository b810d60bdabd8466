pub mod pull_request;
pub mod reference;
pub mod review;
pub mod status;

pub use pull_request::PullRequest;
pub use reference::{PullRequestRef, ReferenceError, RepoName};
pub use review::{RequestedReview, Review, ReviewState};
pub use status::{
    CheckConclusionState, CheckRunStatus, CheckStatusState, ContextStatus, Status, StatusState,
};
