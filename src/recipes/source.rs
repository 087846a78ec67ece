use std::fmt;

use async_trait::async_trait;

use super::types::{SearchRequest, SearchResponse};

/// Errors that can occur while fetching search results.
/// None of these are fatal; the core turns them into a `Failed` status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Body was not the JSON shape we expect.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can answer a recipe search.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Runs one search and returns the decoded body.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FetchError::Network("timed out".into()).to_string(),
            "network error: timed out"
        );
        assert_eq!(
            FetchError::Api {
                status: 503,
                message: "down".into()
            }
            .to_string(),
            "API error (HTTP 503): down"
        );
        assert_eq!(
            FetchError::Parse("eof".into()).to_string(),
            "parse error: eof"
        );
    }
}
