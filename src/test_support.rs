//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::links::{LinkOpener, OpenError};
use crate::recipes::{FetchError, Recipe, RecipeSource, SearchRequest, SearchResponse};

/// A source that never goes to the network and always answers with no results.
pub struct NoopSource;

#[async_trait]
impl RecipeSource for NoopSource {
    fn name(&self) -> &str {
        "noop"
    }

    async fn search(&self, _request: &SearchRequest) -> Result<SearchResponse, FetchError> {
        Ok(SearchResponse::default())
    }
}

/// Records every URL it is asked to open.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        self.opened
            .lock()
            .expect("opener mutex poisoned")
            .push(url.to_string());
        Ok(())
    }
}

/// Creates a test App with a NoopSource.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopSource))
}

pub fn recipe(title: &str, ingredients: &str, href: &str) -> Recipe {
    Recipe {
        title: title.to_string(),
        ingredients: ingredients.to_string(),
        href: href.to_string(),
        thumbnail: None,
    }
}
