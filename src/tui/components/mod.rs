//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line
//! - `RecipeRow`: a single search result
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `SearchBar`: query field and Search button
//! - `RecipeList`: scrollable result view with layout caching
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests. Components receive external data as props
//! rather than reading `App` directly:
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! RecipeList::new(&mut tui.recipe_list, &app.recipes, &app.fetch, frame_idx).render(frame, area);
//! ```

pub mod recipe_list;
pub mod recipe_row;
pub mod search_bar;
pub mod title_bar;

pub use recipe_list::{ListEvent, RecipeList, RecipeListState};
pub use search_bar::{SearchBar, SearchBarEvent, SearchBarHit};
pub use title_bar::TitleBar;
