use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use http::HeaderMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::{GraphQlError, QueryErrorEntry};

pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("pr-status/", env!("CARGO_PKG_VERSION"));

/// Flat mapping of query variable names to scalar or list values.
pub type Variables = Map<String, Value>;

/// Executes one GraphQL document and returns the payload's `data`.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn execute(&self, document: &str, variables: Variables) -> Result<Value, GraphQlError>;
}

/// Request quota reported by the last response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
}

impl RateLimit {
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u32>().ok())
        };
        match (read("x-ratelimit-limit"), read("x-ratelimit-remaining")) {
            (None, None) => None,
            (limit, remaining) => Some(Self {
                limit: limit.unwrap_or(0),
                remaining: remaining.unwrap_or(0),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<QueryErrorEntry>>,
}

/// GitHub GraphQL API client authenticated with a personal access token
pub struct GraphQlClient {
    http: reqwest::Client,
    url: String,
    token: String,
    rate_limit: Mutex<Option<RateLimit>>,
}

impl GraphQlClient {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self, GraphQlError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            url: url.into(),
            token: token.into(),
            rate_limit: Mutex::new(None),
        })
    }

    /// Rate limit as of the most recent response, if GitHub reported one.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        *self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record_rate_limit(&self, headers: &HeaderMap) {
        if let Some(rate_limit) = RateLimit::from_headers(headers) {
            *self
                .rate_limit
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(rate_limit);
        }
    }
}

#[async_trait]
impl QueryClient for GraphQlClient {
    async fn execute(&self, document: &str, variables: Variables) -> Result<Value, GraphQlError> {
        tracing::trace!(url = %self.url, ?variables, "executing GraphQL query");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "query": document,
                "variables": variables,
            }))
            .send()
            .await?;

        self.record_rate_limit(response.headers());

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "GraphQL request failed");
            return Err(GraphQlError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let payload: Payload = serde_json::from_slice(&bytes)?;

        match payload.errors {
            Some(errors) if !errors.is_empty() => Err(GraphQlError::Query { errors }),
            _ => Ok(payload.data.unwrap_or(Value::Null)),
        }
    }
}
