//! In-memory query client and response builders for locator tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use tokio::sync::Barrier;

use super::client::{QueryClient, Variables};
use super::error::{GraphQlError, QueryErrorEntry};

enum Canned {
    Data(Value),
    TransportFailure(u16),
    QueryFailure(Vec<QueryErrorEntry>),
}

struct Expectation {
    document: &'static str,
    variables: Variables,
    response: Canned,
}

impl Expectation {
    fn matches(&self, document: &str, variables: &Variables) -> bool {
        self.document == document
            && self
                .variables
                .iter()
                .all(|(name, value)| variables.get(name) == Some(value))
    }
}

/// Answers queries from a list of canned responses, matching on the
/// document and on every variable the expectation names.
#[derive(Default)]
pub struct CannedQueryClient {
    expectations: Vec<Expectation>,
    calls: Mutex<Vec<Variables>>,
}

fn as_variables(value: Value) -> Variables {
    match value {
        Value::Object(map) => map,
        other => panic!("variables must be an object, got {}", other),
    }
}

impl CannedQueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(mut self, document: &'static str, variables: Value, data: Value) -> Self {
        self.expectations.push(Expectation {
            document,
            variables: as_variables(variables),
            response: Canned::Data(data),
        });
        self
    }

    pub fn fail(mut self, document: &'static str, variables: Value, status: u16) -> Self {
        self.expectations.push(Expectation {
            document,
            variables: as_variables(variables),
            response: Canned::TransportFailure(status),
        });
        self
    }

    /// Answer with a payload whose `errors` list is non-empty.
    pub fn reject(mut self, document: &'static str, variables: Value, errors: Value) -> Self {
        let errors: Vec<QueryErrorEntry> =
            serde_json::from_value(errors).expect("errors must be a list of error entries");
        self.expectations.push(Expectation {
            document,
            variables: as_variables(variables),
            response: Canned::QueryFailure(errors),
        });
        self
    }

    /// Variables of every query performed so far, in call order.
    pub fn calls(&self) -> Vec<Variables> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryClient for CannedQueryClient {
    async fn execute(&self, document: &str, variables: Variables) -> Result<Value, GraphQlError> {
        self.calls.lock().unwrap().push(variables.clone());

        let expectation = self
            .expectations
            .iter()
            .find(|expectation| expectation.matches(document, &variables))
            .unwrap_or_else(|| panic!("Unexpected query performed in test: {:?}", variables));

        match &expectation.response {
            Canned::Data(data) => Ok(data.clone()),
            Canned::TransportFailure(status) => Err(GraphQlError::Transport {
                status: *status,
                body: "canned failure".to_string(),
            }),
            Canned::QueryFailure(errors) => Err(GraphQlError::Query {
                errors: errors.clone(),
            }),
        }
    }
}

/// Holds every query until `parties` queries are in flight at once, then
/// answers them from the wrapped client. Sequential callers never get past
/// the first query.
pub struct GatedQueryClient {
    inner: CannedQueryClient,
    barrier: Barrier,
}

impl GatedQueryClient {
    pub fn new(inner: CannedQueryClient, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl QueryClient for GatedQueryClient {
    async fn execute(&self, document: &str, variables: Variables) -> Result<Value, GraphQlError> {
        self.barrier.wait().await;
        self.inner.execute(document, variables).await
    }
}

pub fn pull_request_node(id: &str, owner: &str, name: &str, number: u64) -> Value {
    json!({
        "id": id,
        "isDraft": false,
        "number": number,
        "title": format!("PR {}", number),
        "url": format!("https://github.com/{}/{}/pull/{}", owner, name, number),
        "baseRepository": {
            "name": name,
            "owner": { "login": owner }
        },
        "reviews": { "nodes": [] },
        "reviewRequests": { "nodes": [] },
        "commits": { "nodes": [] }
    })
}

pub fn with_rollup(mut node: Value, rollup: Value) -> Value {
    node["commits"] = json!({
        "nodes": [{ "commit": { "statusCheckRollup": rollup } }]
    });
    node
}

pub fn rollup(id: &str, contexts: Vec<Value>, end_cursor: Option<&str>, has_next_page: bool) -> Value {
    json!({
        "id": id,
        "contexts": {
            "pageInfo": {
                "endCursor": end_cursor,
                "hasNextPage": has_next_page
            },
            "nodes": contexts
        }
    })
}

pub fn check_run(name: &str, status: &str, conclusion: Option<&str>) -> Value {
    json!({
        "__typename": "CheckRun",
        "checkSuite": { "app": { "name": "GitHub Actions" } },
        "name": name,
        "status": status,
        "conclusion": conclusion,
        "detailsUrl": format!("https://github.com/runs/{}", name)
    })
}

pub fn status_context(context: &str, state: &str) -> Value {
    json!({
        "__typename": "StatusContext",
        "context": context,
        "state": state,
        "targetUrl": format!("https://ci.example.com/{}", context)
    })
}

/// `count` successful check runs named `{prefix}-0`, `{prefix}-1`, ...
pub fn check_runs(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| check_run(&format!("{}-{}", prefix, i), "COMPLETED", Some("SUCCESS")))
        .collect()
}

pub fn search_response(nodes: Vec<Value>) -> Value {
    json!({ "search": { "nodes": nodes } })
}

pub fn by_number_response(node: Option<Value>) -> Value {
    json!({ "repository": { "pullRequest": node } })
}

pub fn pagination_response(rollup: Option<Value>) -> Value {
    json!({ "node": rollup })
}
