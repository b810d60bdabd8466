use serde::{Deserialize, Serialize};

/// Contents of the optional config file.
///
/// Example YAML:
/// ```yaml
/// repos:
///   - octocat/hello-world
/// pulls:
///   - octocat/spoon-knife#12
/// builds_to_show: 5
/// poll_interval: 30s
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repositories ("owner/name") to search for your open pull requests
    #[serde(default)]
    pub repos: Vec<String>,

    /// Pull requests ("owner/name#123" or URL) to always include
    #[serde(default)]
    pub pulls: Vec<String>,

    /// GraphQL endpoint, for GitHub Enterprise
    #[serde(default)]
    pub api_url: Option<String>,

    /// Maximum number of build lines shown per pull request
    #[serde(default)]
    pub builds_to_show: Option<usize>,

    /// Delay between refreshes in --wait mode, e.g. "10s" or "1m"
    #[serde(default)]
    pub poll_interval: Option<String>,
}
