pub mod client;
pub mod error;
pub mod locator;
pub mod pagination;
pub mod queries;
pub mod reviews;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GraphQlClient, QueryClient, RateLimit, Variables, DEFAULT_API_URL};
pub use error::{GraphQlError, QueryErrorEntry};
pub use locator::{PullRequestLocator, Targets};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Build a variables map from name/value pairs.
pub(crate) fn variables<const N: usize>(pairs: [(&str, Value); N]) -> Variables {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Execute `document` and decode its data into `R`.
pub(crate) async fn query<C, R>(
    client: &C,
    document: &str,
    variables: Variables,
) -> Result<R, GraphQlError>
where
    C: QueryClient + ?Sized,
    R: DeserializeOwned,
{
    let data = client.execute(document, variables).await?;
    Ok(serde_json::from_value(data)?)
}
