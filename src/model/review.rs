use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Pending,
    Commented,
    Approved,
    ChangesRequested,
    Dismissed,
    #[serde(other)]
    Unknown,
}

/// A single review left on behalf of a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub reviewer: String,
    pub state: ReviewState,
}

impl Review {
    pub fn new(reviewer: impl Into<String>, state: ReviewState) -> Self {
        Self {
            reviewer: reviewer.into(),
            state,
        }
    }

    /// Whether this review affects the team's summarized state.
    pub fn is_opinionated(&self) -> bool {
        matches!(
            self.state,
            ReviewState::Approved | ReviewState::ChangesRequested | ReviewState::Dismissed
        )
    }
}

/// A team review request and the reviews filed against it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedReview {
    pub team_name: String,
    pub received_reviews: Vec<Review>,
}

impl RequestedReview {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            received_reviews: Vec::new(),
        }
    }

    /// The latest opinionated review state. Until one arrives, the first
    /// review of any kind is reported, and `Pending` if there are none.
    pub fn summarized_state(&self) -> ReviewState {
        self.received_reviews
            .iter()
            .fold(ReviewState::Pending, |state, review| {
                if review.is_opinionated() || state == ReviewState::Pending {
                    review.state
                } else {
                    state
                }
            })
    }

    pub fn reviewers(&self) -> Vec<&str> {
        self.received_reviews
            .iter()
            .map(|review| review.reviewer.as_str())
            .collect()
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(
            self.summarized_state(),
            ReviewState::Approved | ReviewState::Dismissed
        )
    }

    pub fn has_approval(&self) -> bool {
        self.summarized_state() == ReviewState::Approved
    }

    pub fn emoji(&self) -> &'static str {
        match self.summarized_state() {
            ReviewState::Pending => "⏳",
            ReviewState::Approved => "✅",
            ReviewState::Dismissed => "☑️ ",
            ReviewState::ChangesRequested => "❌",
            ReviewState::Commented => "💬",
            ReviewState::Unknown => "❔",
        }
    }
}
