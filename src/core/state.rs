//! # Application State
//!
//! Core business state for the search screen. Domain data only; focus,
//! scroll offsets and cursor positions live in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn RecipeSource>   // where searches go
//! ├── search_query: String            // text box contents, verbatim
//! ├── recipes: Vec<Recipe>            // last successful result set
//! ├── fetch: FetchStatus              // outcome of the latest request
//! ├── latest_seq: u64                 // tag of the newest request issued
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::recipes::{Recipe, RecipeSource};

pub const WELCOME_MESSAGE: &str = "Type a dish or ingredient and press Enter";

/// Observable outcome of the most recent search.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    /// Nothing searched yet.
    Idle,
    /// Request `seq` is in flight.
    Pending { seq: u64 },
    /// The latest request succeeded with `count` recipes.
    Loaded { count: usize, at: DateTime<Local> },
    /// The latest request failed. `recipes` still holds the previous list.
    Failed { reason: String },
}

pub struct App {
    pub source: Arc<dyn RecipeSource>,
    pub search_query: String,
    pub recipes: Vec<Recipe>,
    pub fetch: FetchStatus,
    pub latest_seq: u64,
    pub status_message: String,
}

impl App {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            search_query: String::new(),
            recipes: Vec::new(),
            fetch: FetchStatus::Idle,
            latest_seq: 0,
            status_message: String::from(WELCOME_MESSAGE),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchStatus::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.search_query.is_empty());
        assert!(app.recipes.is_empty());
        assert_eq!(app.fetch, FetchStatus::Idle);
        assert_eq!(app.latest_seq, 0);
        assert_eq!(app.status_message, WELCOME_MESSAGE);
        assert!(!app.is_loading());
    }
}
