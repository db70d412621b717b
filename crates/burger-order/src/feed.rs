//! Public order feed and per-user order history.

use burger_api::{ApiClient, ApiResult, Order};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Public feed state (`/orders/all`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedState {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_pending(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn fetch_fulfilled(&mut self, orders: Vec<Order>, total: u64, total_today: u64) {
        self.is_loading = false;
        self.orders = orders;
        self.total = total;
        self.total_today = total_today;
    }

    pub fn fetch_rejected(&mut self, message: Option<String>) {
        self.is_loading = false;
        self.error_message = message;
    }
}

/// Authenticated user's order history state (`/orders`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    pub orders: Vec<Order>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_pending(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn fetch_fulfilled(&mut self, orders: Vec<Order>) {
        self.is_loading = false;
        self.orders = orders;
    }

    pub fn fetch_rejected(&mut self, message: Option<String>) {
        self.is_loading = false;
        self.error_message = message;
    }
}

/// Manager for the order feed, the user's history, and one-off order lookups.
pub struct FeedManager {
    api: Arc<ApiClient>,
    feed: Mutex<FeedState>,
    history: Mutex<HistoryState>,
}

impl FeedManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            feed: Mutex::new(FeedState::new()),
            history: Mutex::new(HistoryState::new()),
        }
    }

    pub fn feed_snapshot(&self) -> FeedState {
        self.feed.lock().unwrap().clone()
    }

    pub fn history_snapshot(&self) -> HistoryState {
        self.history.lock().unwrap().clone()
    }

    /// Fetch the public order feed.
    pub async fn fetch_feed(&self) -> ApiResult<()> {
        self.feed.lock().unwrap().fetch_pending();

        match self.api.fetch_feed().await {
            Ok(payload) => {
                info!(
                    orders = payload.orders.len(),
                    total = payload.total,
                    "feed fetched"
                );
                self.feed.lock().unwrap().fetch_fulfilled(
                    payload.orders,
                    payload.total,
                    payload.total_today,
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "feed fetch failed");
                self.feed.lock().unwrap().fetch_rejected(e.message());
                Err(e)
            }
        }
    }

    /// Fetch the authenticated user's order history.
    pub async fn fetch_user_orders(&self) -> ApiResult<()> {
        self.history.lock().unwrap().fetch_pending();

        match self.api.fetch_user_orders().await {
            Ok(orders) => {
                info!(orders = orders.len(), "user orders fetched");
                self.history.lock().unwrap().fetch_fulfilled(orders);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "user orders fetch failed");
                self.history.lock().unwrap().fetch_rejected(e.message());
                Err(e)
            }
        }
    }

    /// Look up a single order by number. Does not touch shared state; the
    /// result feeds a detail modal directly.
    pub async fn order_by_number(&self, number: u64) -> ApiResult<Option<Order>> {
        let orders = self.api.fetch_order_by_number(number).await?;
        Ok(orders.into_iter().next())
    }
}
