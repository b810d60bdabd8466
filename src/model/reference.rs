use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("invalid repository \"{0}\": expected owner/name")]
    InvalidRepository(String),

    #[error("invalid pull request \"{0}\": expected owner/name#number or a pull request URL")]
    InvalidPullRequest(String),
}

/// Repository coordinates ("NWO").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
}

impl RepoName {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(char::is_whitespace)
}

impl FromStr for RepoName {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if is_valid_segment(owner) && is_valid_segment(name) && !name.contains('/') =>
            {
                Ok(RepoName::new(owner, name))
            }
            _ => Err(ReferenceError::InvalidRepository(s.to_string())),
        }
    }
}

/// An explicitly requested pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestRef {
    pub repo: RepoName,
    pub number: u64,
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.number)
    }
}

impl FromStr for PullRequestRef {
    type Err = ReferenceError;

    /// Accepts "owner/name#123" or "https://github.com/owner/name/pull/123".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReferenceError::InvalidPullRequest(s.to_string());
        let trimmed = s.trim();

        let (repo, number) = if let Some((repo, number)) = trimmed.split_once('#') {
            (repo.parse::<RepoName>().map_err(|_| invalid())?, number)
        } else {
            // Format: "https://host/owner/repo/pull/123"
            let path = trimmed
                .split_once("://")
                .map(|(_, rest)| rest)
                .ok_or_else(invalid)?;
            let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            match parts.as_slice() {
                [_host, owner, name, "pull", number, ..] => (RepoName::new(*owner, *name), *number),
                _ => return Err(invalid()),
            }
        };

        let number = number.parse::<u64>().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }

        Ok(PullRequestRef { repo, number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_name() {
        let repo: RepoName = "octocat/hello-world".parse().unwrap();
        assert_eq!(repo, RepoName::new("octocat", "hello-world"));
        assert_eq!(repo.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_parse_repo_name_rejects_garbage() {
        assert!("octocat".parse::<RepoName>().is_err());
        assert!("/repo".parse::<RepoName>().is_err());
        assert!("owner/".parse::<RepoName>().is_err());
        assert!("a/b/c".parse::<RepoName>().is_err());
    }

    #[test]
    fn test_parse_short_pull_request_ref() {
        let pr: PullRequestRef = "octocat/hello-world#42".parse().unwrap();
        assert_eq!(pr.repo, RepoName::new("octocat", "hello-world"));
        assert_eq!(pr.number, 42);
        assert_eq!(pr.to_string(), "octocat/hello-world#42");
    }

    #[test]
    fn test_parse_pull_request_url() {
        let pr: PullRequestRef = "https://github.com/octocat/hello-world/pull/7/files"
            .parse()
            .unwrap();
        assert_eq!(pr.repo, RepoName::new("octocat", "hello-world"));
        assert_eq!(pr.number, 7);
    }

    #[test]
    fn test_parse_pull_request_ref_rejects_garbage() {
        assert!("octocat/hello-world".parse::<PullRequestRef>().is_err());
        assert!("octocat/hello-world#abc".parse::<PullRequestRef>().is_err());
        assert!("octocat/hello-world#0".parse::<PullRequestRef>().is_err());
        assert!("https://github.com/octocat/hello-world/issues/1"
            .parse::<PullRequestRef>()
            .is_err());
    }
}
