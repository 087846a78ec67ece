//! Recipe Puppy compatible search API.
//!
//! One GET per search: `{base_url}?q={query}&p={page}`, answered with a JSON
//! object whose `results` array holds `{title, href, ingredients, thumbnail}`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::source::{FetchError, RecipeSource};
use super::types::{SearchRequest, SearchResponse};

/// Builds the request URL. The query is percent-encoded; the base URL is used
/// as-is and may already carry its own query string.
pub fn build_search_url(base_url: &str, query: &str, page: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{base_url}{separator}q={}&p={page}",
        urlencoding::encode(query)
    )
}

/// HTTP client for a Recipe Puppy style endpoint.
pub struct RecipePuppySource {
    base_url: String,
    client: reqwest::Client,
}

impl RecipePuppySource {
    pub fn new(base_url: String, timeout: Duration, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client ({e}), falling back to defaults");
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RecipeSource for RecipePuppySource {
    fn name(&self) -> &str {
        "recipepuppy"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FetchError> {
        let url = build_search_url(&self.base_url, &request.query, request.page);
        info!("Search request #{}: GET {}", request.seq, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Search #{} response status: {}", request.seq, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Recipe API error: {} - {}", status, err_body);
            return Err(FetchError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        match &parsed.results {
            Some(results) => info!("Search #{} decoded {} recipes", request.seq, results.len()),
            None => warn!("Search #{} response has no `results` field", request.seq),
        }

        Ok(parsed)
    }
}
