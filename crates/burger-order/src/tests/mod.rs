//! Flow tests for the order engines.
//!
//! - `catalog_flow.rs` - catalog fetch lifecycle against a scripted transport
//! - `submit_flow.rs`  - assembly + submission lifecycle, including refresh
//! - `feed_flow.rs`    - public feed, user history, order lookup

mod support;
