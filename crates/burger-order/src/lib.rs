//! Order-side state for the Stellar Burgers client engine.
//!
//! This crate provides:
//! - the ingredient catalog state (fetched once, immutable reference data)
//! - the in-progress order assembly (bun slot + keyed fillings) and its
//!   submission lifecycle
//! - the public order feed and the authenticated user's order history

mod assembly;
mod catalog;
mod feed;

#[cfg(test)]
mod tests;

pub use assembly::{
    ready_to_submit, MoveDirection, OrderManager, OrderState, PlacedIngredient,
};
pub use catalog::{CatalogManager, CatalogState};
pub use feed::{FeedManager, FeedState, HistoryState};
