//! Wire types for the remote ordering API.

use serde::{Deserialize, Serialize};

/// Ingredient category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    Bun,
    Main,
    Sauce,
}

impl IngredientKind {
    /// Buns occupy a dedicated slot in an order; everything else stacks.
    pub fn is_bun(self) -> bool {
        matches!(self, IngredientKind::Bun)
    }
}

/// Catalog ingredient. Immutable reference data fetched once from the remote
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    pub proteins: u32,
    pub fat: u32,
    pub carbohydrates: u32,
    pub calories: u32,
    pub price: u64,
    pub image: String,
    pub image_mobile: String,
    pub image_large: String,
}

/// Account profile. Replaced wholesale on login/registration/profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// A submitted order as the API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub ingredients: Vec<String>,
    pub status: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub number: u64,
}

// ==========================================
// Response payloads (envelope bodies minus the `success` flag)
// ==========================================

/// Login/registration payload: the credential pair plus the profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Token refresh payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    pub access_token: String,
    pub refresh_token: String,
}

/// Catalog payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientsPayload {
    pub data: Vec<Ingredient>,
}

/// Public feed payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPayload {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_today: u64,
}

/// Order list payload (user history, order-by-number lookup).
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPayload {
    pub orders: Vec<Order>,
}

/// Order creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrderPayload {
    pub order: Order,
    pub name: String,
}

/// Profile payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub user: User,
}

// ==========================================
// Request bodies
// ==========================================

/// Registration body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update body; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Order creation body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub ingredients: Vec<String>,
}
