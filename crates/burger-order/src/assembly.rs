//! In-progress order assembly and submission state.

use burger_api::{ApiClient, ApiResult, Ingredient, Order};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// Direction for reordering a filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// An ingredient occurrence placed into the in-progress order.
///
/// The client key is generated locally and is distinct from the catalog id:
/// the same ingredient can be added multiple times, and each occurrence must
/// be independently removable and reorderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedIngredient {
    pub ingredient: Ingredient,
    pub client_key: String,
}

impl PlacedIngredient {
    fn place(ingredient: Ingredient) -> Self {
        Self {
            ingredient,
            client_key: Uuid::new_v4().to_string(),
        }
    }
}

/// Order assembly and submission state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    /// At most one bun; adding another replaces it.
    pub bun: Option<Ingredient>,
    /// Non-bun ingredients in insertion order.
    pub fillings: Vec<PlacedIngredient>,
    pub is_order_loading: bool,
    /// Populated only on submission success.
    pub order_data: Option<Order>,
    pub error_message: Option<String>,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog ingredient: buns replace the bun slot, everything else
    /// appends with a fresh client key.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        if ingredient.kind.is_bun() {
            self.bun = Some(ingredient);
        } else {
            self.fillings.push(PlacedIngredient::place(ingredient));
        }
    }

    /// Remove the occurrence with the given client key; no-op if absent.
    pub fn remove_ingredient(&mut self, client_key: &str) {
        self.fillings.retain(|item| item.client_key != client_key);
    }

    /// Swap the filling at `index` with its neighbor; no-op at the ends.
    pub fn move_ingredient(&mut self, index: usize, direction: MoveDirection) {
        match direction {
            MoveDirection::Up if index > 0 && index < self.fillings.len() => {
                self.fillings.swap(index - 1, index);
            }
            MoveDirection::Down if index + 1 < self.fillings.len() => {
                self.fillings.swap(index, index + 1);
            }
            _ => {}
        }
    }

    /// Total price. The bun contributes two halves; never stored, always
    /// recomputed.
    pub fn total_price(&self) -> u64 {
        let bun_price = self.bun.as_ref().map_or(0, |bun| bun.price * 2);
        bun_price
            + self
                .fillings
                .iter()
                .map(|item| item.ingredient.price)
                .sum::<u64>()
    }

    /// Catalog ids submitted for this order: the bun brackets the fillings.
    pub fn ingredient_ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.fillings.len() + 2);
        if let Some(bun) = &self.bun {
            ids.push(bun.id.clone());
        }
        ids.extend(self.fillings.iter().map(|item| item.ingredient.id.clone()));
        if let Some(bun) = &self.bun {
            ids.push(bun.id.clone());
        }
        ids
    }

    pub fn submit_pending(&mut self) {
        self.is_order_loading = true;
        self.error_message = None;
    }

    /// A successful submission stores the order and empties the assembly so a
    /// fresh order can be started.
    pub fn submit_fulfilled(&mut self, order: Order) {
        self.is_order_loading = false;
        self.order_data = Some(order);
        self.bun = None;
        self.fillings.clear();
        self.error_message = None;
    }

    pub fn submit_rejected(&mut self, message: Option<String>) {
        self.is_order_loading = false;
        self.error_message = message;
    }

    /// Reset the whole slice to its initial form. Used when the result modal
    /// is dismissed.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Submission eligibility, computed by collaborators rather than enforced by
/// the state itself: a bun, at least one filling, and no submission in
/// flight.
pub fn ready_to_submit(state: &OrderState) -> bool {
    state.bun.is_some() && !state.fillings.is_empty() && !state.is_order_loading
}

/// Manager for the in-progress order.
pub struct OrderManager {
    api: Arc<ApiClient>,
    state: Mutex<OrderState>,
}

impl OrderManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(OrderState::new()),
        }
    }

    /// Current state, cloned for UI collaborators.
    pub fn snapshot(&self) -> OrderState {
        self.state.lock().unwrap().clone()
    }

    pub fn add_ingredient(&self, ingredient: Ingredient) {
        self.state.lock().unwrap().add_ingredient(ingredient);
    }

    pub fn remove_ingredient(&self, client_key: &str) {
        self.state.lock().unwrap().remove_ingredient(client_key);
    }

    pub fn move_ingredient(&self, index: usize, direction: MoveDirection) {
        self.state.lock().unwrap().move_ingredient(index, direction);
    }

    pub fn total_price(&self) -> u64 {
        self.state.lock().unwrap().total_price()
    }

    pub fn clear_order(&self) {
        self.state.lock().unwrap().clear();
    }

    /// Submit the assembled order. On success the assembly is emptied and the
    /// created order is retained for the result modal.
    pub async fn submit_order(&self) -> ApiResult<Order> {
        let ingredient_ids = {
            let mut state = self.state.lock().unwrap();
            state.submit_pending();
            state.ingredient_ids()
        };

        match self.api.create_order(ingredient_ids).await {
            Ok(created) => {
                info!(number = created.order.number, "order created");
                self.state.lock().unwrap().submit_fulfilled(created.order.clone());
                Ok(created.order)
            }
            Err(e) => {
                warn!(error = %e, "order submission failed");
                self.state.lock().unwrap().submit_rejected(e.message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burger_api::IngredientKind;

    fn ingredient(id: &str, kind: IngredientKind, price: u64) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: format!("Ingredient {id}"),
            kind,
            proteins: 10,
            fat: 10,
            carbohydrates: 10,
            calories: 100,
            price,
            image: String::new(),
            image_mobile: String::new(),
            image_large: String::new(),
        }
    }

    fn bun(price: u64) -> Ingredient {
        ingredient("bun-1", IngredientKind::Bun, price)
    }

    fn filling(id: &str, price: u64) -> Ingredient {
        ingredient(id, IngredientKind::Main, price)
    }

    #[test]
    fn test_add_bun_occupies_slot() {
        let mut state = OrderState::new();
        state.add_ingredient(bun(100));

        assert!(state.bun.is_some());
        assert!(state.fillings.is_empty());
    }

    #[test]
    fn test_second_bun_replaces_never_appends() {
        let mut state = OrderState::new();
        state.add_ingredient(bun(100));
        state.add_ingredient(ingredient("bun-2", IngredientKind::Bun, 200));

        assert_eq!(state.bun.as_ref().unwrap().id, "bun-2");
        assert!(state.fillings.is_empty());
    }

    #[test]
    fn test_fillings_keep_insertion_order() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));
        state.add_ingredient(filling("b", 20));
        state.add_ingredient(filling("c", 30));

        let ids: Vec<_> = state
            .fillings
            .iter()
            .map(|item| item.ingredient.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_ingredient_gets_distinct_keys() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));
        state.add_ingredient(filling("a", 10));

        assert_eq!(state.fillings.len(), 2);
        assert_ne!(state.fillings[0].client_key, state.fillings[1].client_key);
    }

    #[test]
    fn test_remove_targets_one_occurrence() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));
        state.add_ingredient(filling("a", 10));

        let key = state.fillings[0].client_key.clone();
        state.remove_ingredient(&key);

        assert_eq!(state.fillings.len(), 1);
        assert_ne!(state.fillings[0].client_key, key);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));

        state.remove_ingredient("no-such-key");
        assert_eq!(state.fillings.len(), 1);
    }

    #[test]
    fn test_move_up_and_down() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));
        state.add_ingredient(filling("b", 20));
        state.add_ingredient(filling("c", 30));

        state.move_ingredient(1, MoveDirection::Up);
        let ids: Vec<_> = state
            .fillings
            .iter()
            .map(|item| item.ingredient.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);

        state.move_ingredient(1, MoveDirection::Down);
        let ids: Vec<_> = state
            .fillings
            .iter()
            .map(|item| item.ingredient.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));
        state.add_ingredient(filling("b", 20));

        let before = state.fillings.clone();

        state.move_ingredient(0, MoveDirection::Up);
        assert_eq!(state.fillings, before);

        state.move_ingredient(1, MoveDirection::Down);
        assert_eq!(state.fillings, before);
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));

        let before = state.fillings.clone();
        state.move_ingredient(5, MoveDirection::Up);
        state.move_ingredient(5, MoveDirection::Down);
        assert_eq!(state.fillings, before);
    }

    #[test]
    fn test_total_price_counts_bun_twice() {
        let mut state = OrderState::new();
        state.add_ingredient(bun(100));
        state.add_ingredient(filling("a", 30));
        state.add_ingredient(filling("b", 45));

        assert_eq!(state.total_price(), 2 * 100 + 30 + 45);
    }

    #[test]
    fn test_total_price_empty_is_zero() {
        let state = OrderState::new();
        assert_eq!(state.total_price(), 0);
    }

    #[test]
    fn test_total_price_without_bun() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 30));
        assert_eq!(state.total_price(), 30);
    }

    #[test]
    fn test_ingredient_ids_bracketed_by_bun() {
        let mut state = OrderState::new();
        state.add_ingredient(bun(100));
        state.add_ingredient(filling("a", 10));
        state.add_ingredient(filling("b", 20));

        assert_eq!(state.ingredient_ids(), ["bun-1", "a", "b", "bun-1"]);
    }

    #[test]
    fn test_ingredient_ids_without_bun() {
        let mut state = OrderState::new();
        state.add_ingredient(filling("a", 10));
        assert_eq!(state.ingredient_ids(), ["a"]);
    }

    #[test]
    fn test_clear_resets_everything_and_is_idempotent() {
        let mut state = OrderState::new();
        state.add_ingredient(bun(100));
        state.add_ingredient(filling("a", 10));
        state.submit_pending();
        state.submit_rejected(Some("boom".to_string()));

        state.clear();
        assert_eq!(state, OrderState::default());

        state.clear();
        assert_eq!(state, OrderState::default());
    }

    #[test]
    fn test_ready_to_submit() {
        let mut state = OrderState::new();
        assert!(!ready_to_submit(&state));

        state.add_ingredient(bun(100));
        assert!(!ready_to_submit(&state));

        state.add_ingredient(filling("a", 10));
        assert!(ready_to_submit(&state));

        state.submit_pending();
        assert!(!ready_to_submit(&state));
    }

    #[test]
    fn test_submit_lifecycle_appliers() {
        let mut state = OrderState::new();
        state.add_ingredient(bun(100));
        state.add_ingredient(filling("a", 10));

        state.submit_pending();
        assert!(state.is_order_loading);
        assert_eq!(state.error_message, None);

        let order = Order {
            id: "o-1".to_string(),
            ingredients: vec!["bun-1".into(), "a".into(), "bun-1".into()],
            status: "done".to_string(),
            name: "Space burger".to_string(),
            created_at: "2024-06-01T10:00:00.000Z".to_string(),
            updated_at: "2024-06-01T10:00:05.000Z".to_string(),
            number: 40123,
        };
        state.submit_fulfilled(order.clone());

        assert!(!state.is_order_loading);
        assert_eq!(state.order_data, Some(order));
        assert!(state.bun.is_none());
        assert!(state.fillings.is_empty());
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_submit_rejected_records_message() {
        let mut state = OrderState::new();
        state.submit_pending();
        state.submit_rejected(Some("Ingredient ids must be provided".to_string()));

        assert!(!state.is_order_loading);
        assert_eq!(
            state.error_message,
            Some("Ingredient ids must be provided".to_string())
        );
    }
}
