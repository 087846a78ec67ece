pub mod puppy;
pub mod source;
pub mod types;

pub use puppy::RecipePuppySource;
pub use source::{FetchError, RecipeSource};
pub use types::{Recipe, SearchRequest, SearchResponse};
