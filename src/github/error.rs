//! Errors raised while executing GraphQL queries.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// One entry of a GraphQL payload's top-level `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryErrorEntry {
    pub message: String,
    /// GitHub's error classification (e.g. `NOT_FOUND`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub path: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(u64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(field) => write!(f, "{}", field),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl fmt::Display for QueryErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = &self.kind {
            write!(f, "[{}] ", kind)?;
        }
        write!(f, "{}", self.message)?;
        if !self.path.is_empty() {
            let path: Vec<String> = self.path.iter().map(ToString::to_string).collect();
            write!(f, " (at {})", path.join("."))?;
        }
        Ok(())
    }
}

fn summarize(errors: &[QueryErrorEntry]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures of the query-execution layer.
///
/// Nothing in the locator catches these: any of them aborts the whole
/// enclosing search, lookup or pagination drain.
#[derive(Debug, Error)]
pub enum GraphQlError {
    /// The API answered with a non-success HTTP status.
    #[error("unable to query GraphQL API: HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// No response was received at all.
    #[error("network error talking to GitHub: {0}")]
    Network(#[from] reqwest::Error),

    /// The request succeeded but the payload reported errors.
    #[error("the GraphQL query encountered errors: {}", summarize(.errors))]
    Query { errors: Vec<QueryErrorEntry> },

    /// The payload did not have the expected shape.
    #[error("unexpected GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GraphQlError {
    /// Whether GitHub rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GraphQlError::Transport { status: 401, .. })
    }
}
