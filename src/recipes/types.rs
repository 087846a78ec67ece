use serde::{Deserialize, Serialize};

/// The only page ever requested. Pagination is not supported.
pub const FIRST_PAGE: u32 = 1;

/// A single search hit as returned by the recipe API.
///
/// Fields the API omits decode as empty strings; unknown fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    #[serde(default)]
    pub title: String,
    /// Free-text ingredient blob, usually comma separated.
    #[serde(default)]
    pub ingredients: String,
    /// External link to the full recipe.
    #[serde(default)]
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Recipe {
    /// Stable identity of a row at `index`: position joined with the title.
    pub fn row_key(&self, index: usize) -> String {
        format!("{index}-{}", self.title)
    }
}

/// Body of a search response. `results` may be absent entirely.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<Recipe>>,
}

/// Everything a source needs to run one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence tag assigned by the core; echoed back with the outcome.
    pub seq: u64,
    /// Raw user text. Encoding happens when the URL is built.
    pub query: String,
    pub page: u32,
}

impl SearchRequest {
    pub fn new(seq: u64, query: impl Into<String>) -> Self {
        Self {
            seq,
            query: query.into(),
            page: FIRST_PAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_results() {
        let body = r#"{"title":"Recipe Puppy","version":0.1,"results":[
            {"title":"Pasta","href":"http://x/pasta","ingredients":"pasta, sauce","thumbnail":""}
        ]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Pasta");
        assert_eq!(results[0].ingredients, "pasta, sauce");
        assert_eq!(results[0].href, "http://x/pasta");
    }

    #[test]
    fn test_missing_results_is_none() {
        let response: SearchResponse = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_missing_recipe_fields_default_to_empty() {
        let recipe: Recipe = serde_json::from_str(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(recipe.title, "Only title");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.href.is_empty());
        assert!(recipe.thumbnail.is_none());
    }

    #[test]
    fn test_row_key_joins_index_and_title() {
        let recipe = Recipe {
            title: "Soup".to_string(),
            ..Default::default()
        };
        assert_eq!(recipe.row_key(0), "0-Soup");
        assert_eq!(recipe.row_key(12), "12-Soup");
    }

    #[test]
    fn test_search_request_always_first_page() {
        let req = SearchRequest::new(3, "chicken");
        assert_eq!(req.page, 1);
        assert_eq!(req.seq, 3);
        assert_eq!(req.query, "chicken");
    }
}
