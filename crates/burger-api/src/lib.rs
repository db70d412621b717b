//! HTTP client for the remote ordering API.
//!
//! This crate provides:
//! - envelope-aware request dispatch (`{success, ...}` interpretation)
//! - a tagged error taxonomy produced at the HTTP boundary
//! - transparent one-shot credential refresh with single-flight coalescing
//! - typed endpoints for the catalog, orders, auth, and password reset

mod client;
mod error;
mod transport;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, JWT_EXPIRED_MESSAGE};
pub use transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};
pub use types::{
    AuthPayload, CreateOrderRequest, CreatedOrderPayload, FeedPayload, Ingredient,
    IngredientKind, IngredientsPayload, LoginRequest, Order, OrdersPayload, ProfilePatch,
    RefreshPayload, RegisterRequest, User, UserPayload,
};
