//! # Actions
//!
//! Everything that can happen on the search screen becomes an `Action`.
//! User edits the query? That's `Action::QueryChanged(text)`.
//! The API answers? That's `Action::ResultsReceived { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter has to carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every request carries the sequence number it was issued with. Only the
//! answer to the newest request may touch the state; anything older is
//! dropped on arrival.

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::state::{App, FetchStatus};
use crate::recipes::{FetchError, Recipe, SearchRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Full replacement of the query text.
    QueryChanged(String),
    /// The search trigger was activated.
    Submit,
    /// A request finished and its body decoded. `results` is `None` when the
    /// body had no `results` field.
    ResultsReceived {
        seq: u64,
        results: Option<Vec<Recipe>>,
        received_at: DateTime<Local>,
    },
    /// A request failed at the transport, status or decode level.
    SearchFailed { seq: u64, error: FetchError },
    /// The "View Recipe" control of row `index` was activated.
    OpenRecipe(usize),
    /// The platform refused to open a link.
    LinkFailed(String),
    Quit,
}

/// Side effects requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnSearch(SearchRequest),
    OpenLink(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::QueryChanged(text) => {
            app.search_query = text;
            Effect::None
        }
        Action::Submit => {
            app.latest_seq += 1;
            let seq = app.latest_seq;
            app.fetch = FetchStatus::Pending { seq };
            app.status_message = format!("Searching for \"{}\"...", app.search_query);
            info!("Submitting search #{} for {:?}", seq, app.search_query);
            Effect::SpawnSearch(SearchRequest::new(seq, app.search_query.clone()))
        }
        Action::ResultsReceived {
            seq,
            results,
            received_at,
        } => {
            if seq != app.latest_seq {
                debug!(
                    "Dropping stale results for #{} (latest is #{})",
                    seq, app.latest_seq
                );
                return Effect::None;
            }
            // An absent `results` field clears the list, same as an empty page.
            let recipes = results.unwrap_or_default();
            let count = recipes.len();
            app.recipes = recipes;
            app.fetch = FetchStatus::Loaded {
                count,
                at: received_at,
            };
            app.status_message = match count {
                0 => "No recipes found".to_string(),
                1 => format!("1 recipe (updated {})", received_at.format("%H:%M:%S")),
                n => format!("{n} recipes (updated {})", received_at.format("%H:%M:%S")),
            };
            Effect::None
        }
        Action::SearchFailed { seq, error } => {
            if seq != app.latest_seq {
                debug!(
                    "Dropping stale failure for #{} (latest is #{}): {}",
                    seq, app.latest_seq, error
                );
                return Effect::None;
            }
            warn!("Search #{} failed: {}", seq, error);
            app.status_message = format!("Search failed: {error}");
            app.fetch = FetchStatus::Failed {
                reason: error.to_string(),
            };
            Effect::None
        }
        Action::OpenRecipe(index) => match app.recipes.get(index) {
            Some(recipe) => Effect::OpenLink(recipe.href.clone()),
            None => {
                debug!("OpenRecipe({}) out of range ({} rows)", index, app.recipes.len());
                Effect::None
            }
        },
        Action::LinkFailed(reason) => {
            app.status_message = reason;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
