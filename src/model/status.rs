use serde::Deserialize;

/// Lifecycle of a check run as reported by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatusState {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Pending,
    Requested,
    #[serde(other)]
    Unknown,
}

/// Outcome of a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckConclusionState {
    ActionRequired,
    TimedOut,
    Cancelled,
    Failure,
    Success,
    Neutral,
    Skipped,
    StartupFailure,
    Stale,
    #[serde(other)]
    Unknown,
}

impl CheckConclusionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckConclusionState::ActionRequired => "action_required",
            CheckConclusionState::TimedOut => "timed_out",
            CheckConclusionState::Cancelled => "cancelled",
            CheckConclusionState::Failure => "failure",
            CheckConclusionState::Success => "success",
            CheckConclusionState::Neutral => "neutral",
            CheckConclusionState::Skipped => "skipped",
            CheckConclusionState::StartupFailure => "startup_failure",
            CheckConclusionState::Stale => "stale",
            CheckConclusionState::Unknown => "unknown",
        }
    }
}

/// State of a commit status context (the pre-Checks API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusState {
    Expected,
    Error,
    Failure,
    Pending,
    Success,
    #[serde(other)]
    Unknown,
}

impl StatusState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusState::Expected => "expected",
            StatusState::Error => "error",
            StatusState::Failure => "failure",
            StatusState::Pending => "pending",
            StatusState::Success => "success",
            StatusState::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunStatus {
    pub url: String,
    pub suite_name: String,
    pub run_name: String,
    pub status: CheckStatusState,
    /// Only meaningful once `status` is `Completed`.
    pub conclusion: Option<CheckConclusionState>,
}

impl CheckRunStatus {
    pub fn is_pending(&self) -> bool {
        self.status != CheckStatusState::Completed
    }

    fn completed_with(&self, accepted: &[CheckConclusionState]) -> bool {
        !self.is_pending()
            && self
                .conclusion
                .is_some_and(|conclusion| accepted.contains(&conclusion))
    }

    pub fn is_success(&self) -> bool {
        self.completed_with(&[CheckConclusionState::Success])
    }

    pub fn is_neutral(&self) -> bool {
        self.completed_with(&[CheckConclusionState::Neutral, CheckConclusionState::Stale])
    }

    pub fn is_failed(&self) -> bool {
        self.completed_with(&[
            CheckConclusionState::TimedOut,
            CheckConclusionState::Cancelled,
            CheckConclusionState::Failure,
            CheckConclusionState::StartupFailure,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStatus {
    pub url: String,
    pub context: String,
    pub state: StatusState,
}

impl ContextStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self.state, StatusState::Expected | StatusState::Pending)
    }

    pub fn is_success(&self) -> bool {
        self.state == StatusState::Success
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, StatusState::Error | StatusState::Failure)
    }
}

/// A single CI entry from a commit's status check rollup.
///
/// A completed check run whose conclusion is neither success, neutral nor
/// failure (e.g. `ACTION_REQUIRED`, `SKIPPED`) is left unclassified: it is
/// completed, but every outcome predicate reports `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    CheckRun(CheckRunStatus),
    Context(ContextStatus),
}

impl Status {
    pub fn url(&self) -> &str {
        match self {
            Status::CheckRun(run) => &run.url,
            Status::Context(context) => &context.url,
        }
    }

    pub fn is_pending(&self) -> bool {
        match self {
            Status::CheckRun(run) => run.is_pending(),
            Status::Context(context) => context.is_pending(),
        }
    }

    pub fn is_completed(&self) -> bool {
        !self.is_pending()
    }

    pub fn is_success(&self) -> bool {
        match self {
            Status::CheckRun(run) => run.is_success(),
            Status::Context(context) => context.is_success(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        match self {
            Status::CheckRun(run) => run.is_neutral(),
            Status::Context(_) => false,
        }
    }

    pub fn is_failed(&self) -> bool {
        match self {
            Status::CheckRun(run) => run.is_failed(),
            Status::Context(context) => context.is_failed(),
        }
    }

    pub fn emoji(&self) -> &'static str {
        if self.is_pending() {
            "⏳"
        } else if self.is_success() {
            "✅"
        } else if self.is_neutral() {
            "☑️ "
        } else if self.is_failed() {
            "❌"
        } else {
            "❔"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn check_run(status: CheckStatusState, conclusion: Option<CheckConclusionState>) -> Status {
        Status::CheckRun(CheckRunStatus {
            url: "https://github.com/owner/repo/runs/1".to_string(),
            suite_name: "GitHub Actions".to_string(),
            run_name: "build".to_string(),
            status,
            conclusion,
        })
    }

    fn context(state: StatusState) -> Status {
        Status::Context(ContextStatus {
            url: "https://ci.example.com/build/1".to_string(),
            context: "ci/build".to_string(),
            state,
        })
    }

    #[rstest]
    #[case(CheckStatusState::Queued)]
    #[case(CheckStatusState::InProgress)]
    #[case(CheckStatusState::Waiting)]
    #[case(CheckStatusState::Pending)]
    #[case(CheckStatusState::Requested)]
    #[case(CheckStatusState::Unknown)]
    fn test_check_run_pending_until_completed(#[case] state: CheckStatusState) {
        let status = check_run(state, Some(CheckConclusionState::Success));
        assert!(status.is_pending());
        assert!(!status.is_completed());
        assert!(!status.is_success());
        assert!(!status.is_neutral());
        assert!(!status.is_failed());
        assert_eq!(status.emoji(), "⏳");
    }

    // (conclusion, success, neutral, failed)
    #[rstest]
    #[case(CheckConclusionState::Success, true, false, false)]
    #[case(CheckConclusionState::Neutral, false, true, false)]
    #[case(CheckConclusionState::Stale, false, true, false)]
    #[case(CheckConclusionState::TimedOut, false, false, true)]
    #[case(CheckConclusionState::Cancelled, false, false, true)]
    #[case(CheckConclusionState::Failure, false, false, true)]
    #[case(CheckConclusionState::StartupFailure, false, false, true)]
    #[case(CheckConclusionState::ActionRequired, false, false, false)]
    #[case(CheckConclusionState::Skipped, false, false, false)]
    fn test_check_run_completed_classification(
        #[case] conclusion: CheckConclusionState,
        #[case] success: bool,
        #[case] neutral: bool,
        #[case] failed: bool,
    ) {
        let status = check_run(CheckStatusState::Completed, Some(conclusion));
        assert!(!status.is_pending());
        assert!(status.is_completed());
        assert_eq!(status.is_success(), success);
        assert_eq!(status.is_neutral(), neutral);
        assert_eq!(status.is_failed(), failed);
    }

    #[test]
    fn test_check_run_action_required_is_unclassified() {
        let status = check_run(
            CheckStatusState::Completed,
            Some(CheckConclusionState::ActionRequired),
        );
        assert!(status.is_completed());
        assert_eq!(status.emoji(), "❔");
    }

    #[test]
    fn test_check_run_completed_without_conclusion() {
        let status = check_run(CheckStatusState::Completed, None);
        assert!(status.is_completed());
        assert!(!status.is_success());
        assert!(!status.is_failed());
    }

    // (state, pending, success, failed)
    #[rstest]
    #[case(StatusState::Expected, true, false, false)]
    #[case(StatusState::Pending, true, false, false)]
    #[case(StatusState::Success, false, true, false)]
    #[case(StatusState::Error, false, false, true)]
    #[case(StatusState::Failure, false, false, true)]
    fn test_context_classification(
        #[case] state: StatusState,
        #[case] pending: bool,
        #[case] success: bool,
        #[case] failed: bool,
    ) {
        let status = context(state);
        assert_eq!(status.is_pending(), pending);
        assert_eq!(status.is_completed(), !pending);
        assert_eq!(status.is_success(), success);
        assert!(!status.is_neutral());
        assert_eq!(status.is_failed(), failed);
    }

    #[test]
    fn test_emoji() {
        assert_eq!(context(StatusState::Pending).emoji(), "⏳");
        assert_eq!(context(StatusState::Success).emoji(), "✅");
        assert_eq!(context(StatusState::Failure).emoji(), "❌");
        assert_eq!(context(StatusState::Unknown).emoji(), "❔");
        assert_eq!(
            check_run(CheckStatusState::Completed, Some(CheckConclusionState::Neutral)).emoji(),
            "☑️ "
        );
    }

    #[test]
    fn test_states_deserialize_from_wire_names() {
        let status: CheckStatusState = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, CheckStatusState::InProgress);
        let conclusion: CheckConclusionState =
            serde_json::from_str("\"STARTUP_FAILURE\"").unwrap();
        assert_eq!(conclusion, CheckConclusionState::StartupFailure);
        let state: StatusState = serde_json::from_str("\"EXPECTED\"").unwrap();
        assert_eq!(state, StatusState::Expected);
        let unknown: CheckConclusionState = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(unknown, CheckConclusionState::Unknown);
    }
}
