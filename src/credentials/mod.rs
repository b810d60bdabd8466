use thiserror::Error;

/// Environment variables checked for a GitHub token, in priority order
pub const ENV_TOKEN_VARS: [&str; 2] = ["GH_GH_PAT", "GITHUB_TOKEN"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "no GitHub access token found. Provide one via $GITHUB_TOKEN, $GH_GH_PAT or the -t/--token argument"
    )]
    TokenNotFound,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Pick the token from the command line, falling back to the environment.
///
/// `lookup` reads an environment variable; blank values are ignored.
pub fn resolve_token<F>(cli_token: Option<String>, lookup: F) -> Result<String, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(cli_token)
        .or_else(|| {
            ENV_TOKEN_VARS
                .iter()
                .find_map(|name| non_blank(lookup(name)))
        })
        .ok_or(CredentialError::TokenNotFound)
}

/// Resolve the token against the process environment.
pub fn get_token(cli_token: Option<String>) -> Result<String, CredentialError> {
    resolve_token(cli_token, |name| std::env::var(name).ok())
}
