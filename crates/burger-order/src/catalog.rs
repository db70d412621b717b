//! Ingredient catalog state.

use burger_api::{ApiClient, ApiResult, Ingredient};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Catalog fetch state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    pub ingredients_list: Vec<Ingredient>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_pending(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn fetch_fulfilled(&mut self, ingredients: Vec<Ingredient>) {
        self.is_loading = false;
        self.ingredients_list = ingredients;
    }

    pub fn fetch_rejected(&mut self, message: Option<String>) {
        self.is_loading = false;
        self.error_message = message;
    }
}

/// Manager for the immutable ingredient catalog.
pub struct CatalogManager {
    api: Arc<ApiClient>,
    state: Mutex<CatalogState>,
}

impl CatalogManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(CatalogState::new()),
        }
    }

    /// Current state, cloned for UI collaborators.
    pub fn snapshot(&self) -> CatalogState {
        self.state.lock().unwrap().clone()
    }

    /// Fetch the catalog from the remote API.
    pub async fn fetch_ingredients(&self) -> ApiResult<()> {
        self.state.lock().unwrap().fetch_pending();

        match self.api.fetch_ingredients().await {
            Ok(ingredients) => {
                info!(count = ingredients.len(), "ingredient catalog fetched");
                self.state.lock().unwrap().fetch_fulfilled(ingredients);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "ingredient catalog fetch failed");
                self.state.lock().unwrap().fetch_rejected(e.message());
                Err(e)
            }
        }
    }

    /// Look an ingredient up by catalog id.
    pub fn find(&self, id: &str) -> Option<Ingredient> {
        self.state
            .lock()
            .unwrap()
            .ingredients_list
            .iter()
            .find(|ingredient| ingredient.id == id)
            .cloned()
    }
}
