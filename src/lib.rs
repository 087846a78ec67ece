//! recipe-search library exports for testing

pub mod core;
pub mod links;
pub mod recipes;
pub mod tui;

#[cfg(test)]
pub mod test_support;
