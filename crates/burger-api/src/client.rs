//! Authenticated API client with transparent credential refresh.
//!
//! Every response is a `{success, ...}` envelope; the call fails whenever the
//! transport status is not OK or the parsed `success` flag is false. An
//! authenticated call that fails with the expired-credential signature gets
//! exactly one refresh-and-retry cycle; any other failure propagates
//! immediately. Refreshes are single-flight: concurrent expired calls
//! serialize on a gate, and late arrivals reuse the token the first caller
//! minted.

use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};
use crate::types::{
    AuthPayload, CreateOrderRequest, CreatedOrderPayload, FeedPayload, Ingredient,
    IngredientsPayload, LoginRequest, Order, OrdersPayload, ProfilePatch, RefreshPayload,
    RegisterRequest, User, UserPayload,
};
use burger_core::Config;
use burger_storage::CredentialStore;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Client for the remote ordering API.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
    base_url: String,
    /// Serializes credential refreshes; concurrent expired calls coalesce here.
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    /// Create a client over the production reqwest transport.
    pub fn new(base_url: impl Into<String>, credentials: Arc<CredentialStore>) -> Self {
        Self::with_transport(base_url, credentials, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &Config, credentials: Arc<CredentialStore>) -> Self {
        Self::new(config.api_base_url.clone(), credentials)
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        base_url: impl Into<String>,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            transport,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            refresh_gate: Mutex::new(()),
        }
    }

    /// The credential store this client reads and writes.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Interpret the `{success, ...}` envelope.
    ///
    /// The parsed `success` flag is authoritative once parsing succeeds,
    /// regardless of status code. An unparseable body on a non-OK status
    /// becomes an application failure without a message.
    fn interpret(raw: RawResponse) -> ApiResult<Value> {
        let parsed: Value = match serde_json::from_str(&raw.body) {
            Ok(value) => value,
            Err(e) => {
                if raw.ok {
                    return Err(ApiError::Json(e));
                }
                return Err(ApiError::Application { message: None });
            }
        };

        let success = parsed
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if raw.ok && success {
            return Ok(parsed);
        }

        let message = parsed
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Err(ApiError::from_failure_message(message))
    }

    async fn dispatch(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = request.url.clone();
        let raw = self.transport.execute(request).await?;
        match Self::interpret(raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(url = %url, error = %e, "API call failed");
                Err(e)
            }
        }
    }

    /// Unauthenticated request: single attempt, no retry.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        debug!(path = %path, "API request");
        self.dispatch(ApiRequest {
            method,
            url: self.endpoint(path),
            authorization: None,
            body,
        })
        .await
    }

    /// Authenticated request with the one-shot refresh-and-retry policy.
    async fn request_with_refresh(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let pair = self
            .credentials
            .credential_pair()?
            .ok_or(ApiError::MissingCredentials)?;

        debug!(path = %path, "authenticated API request");
        let attempt = ApiRequest {
            method: method.clone(),
            url: self.endpoint(path),
            authorization: Some(pair.access_token.clone()),
            body: body.clone(),
        };

        match self.dispatch(attempt).await {
            Err(ApiError::ExpiredCredential) => {
                debug!(path = %path, "access credential expired, refreshing");
                let access_token = self.refresh_session(&pair.access_token).await?;
                let retry = ApiRequest {
                    method,
                    url: self.endpoint(path),
                    authorization: Some(access_token),
                    body,
                };
                self.dispatch(retry).await
            }
            other => other,
        }
    }

    /// Mint a new access credential from the stored refresh credential and
    /// persist the returned pair.
    ///
    /// Single-flight: callers serialize on the refresh gate. A caller that
    /// acquires the gate after another call already refreshed sees a changed
    /// access token and reuses it without a second network refresh.
    async fn refresh_session(&self, stale_access_token: &str) -> ApiResult<String> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.credentials.access_token() {
            if current != stale_access_token {
                debug!("reusing access credential refreshed by a concurrent call");
                return Ok(current);
            }
        }

        let refresh_token = self
            .credentials
            .refresh_token()?
            .ok_or(ApiError::MissingCredentials)?;

        let value = self
            .request(Method::POST, "auth/token", Some(json!({ "token": refresh_token })))
            .await?;
        let payload: RefreshPayload = decode(value)?;

        self.credentials
            .store_pair(&payload.access_token, &payload.refresh_token)?;
        info!("access credential refreshed");

        Ok(payload.access_token)
    }

    // ==========================================
    // Catalog and feed (unauthenticated)
    // ==========================================

    /// Fetch the ingredient catalog.
    pub async fn fetch_ingredients(&self) -> ApiResult<Vec<Ingredient>> {
        let value = self.request(Method::GET, "ingredients", None).await?;
        let payload: IngredientsPayload = decode(value)?;
        Ok(payload.data)
    }

    /// Fetch the public order feed.
    pub async fn fetch_feed(&self) -> ApiResult<FeedPayload> {
        let value = self.request(Method::GET, "orders/all", None).await?;
        decode(value)
    }

    /// Look up orders by number.
    pub async fn fetch_order_by_number(&self, number: u64) -> ApiResult<Vec<Order>> {
        let value = self
            .request(Method::GET, &format!("orders/{number}"), None)
            .await?;
        let payload: OrdersPayload = decode(value)?;
        Ok(payload.orders)
    }

    // ==========================================
    // Orders (authenticated)
    // ==========================================

    /// Fetch the authenticated user's order history.
    pub async fn fetch_user_orders(&self) -> ApiResult<Vec<Order>> {
        let value = self.request_with_refresh(Method::GET, "orders", None).await?;
        let payload: OrdersPayload = decode(value)?;
        Ok(payload.orders)
    }

    /// Create an order from catalog ingredient ids.
    pub async fn create_order(&self, ingredient_ids: Vec<String>) -> ApiResult<CreatedOrderPayload> {
        let body = serde_json::to_value(CreateOrderRequest {
            ingredients: ingredient_ids,
        })?;
        let value = self
            .request_with_refresh(Method::POST, "orders", Some(body))
            .await?;
        decode(value)
    }

    // ==========================================
    // Auth
    // ==========================================

    /// Register a new account. The returned pair is persisted by the caller.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthPayload> {
        let body = serde_json::to_value(request)?;
        let value = self
            .request(Method::POST, "auth/register", Some(body))
            .await?;
        decode(value)
    }

    /// Log in. The returned pair is persisted by the caller.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthPayload> {
        let body = serde_json::to_value(request)?;
        let value = self.request(Method::POST, "auth/login", Some(body)).await?;
        decode(value)
    }

    /// Invalidate the stored refresh credential server-side.
    pub async fn logout(&self) -> ApiResult<()> {
        let refresh_token = self
            .credentials
            .refresh_token()?
            .ok_or(ApiError::MissingCredentials)?;
        self.request(
            Method::POST,
            "auth/logout",
            Some(json!({ "token": refresh_token })),
        )
        .await?;
        Ok(())
    }

    /// Fetch the authenticated user's profile.
    pub async fn fetch_profile(&self) -> ApiResult<User> {
        let value = self.request_with_refresh(Method::GET, "auth/user", None).await?;
        let payload: UserPayload = decode(value)?;
        Ok(payload.user)
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> ApiResult<User> {
        let body = serde_json::to_value(patch)?;
        let value = self
            .request_with_refresh(Method::PATCH, "auth/user", Some(body))
            .await?;
        let payload: UserPayload = decode(value)?;
        Ok(payload.user)
    }

    // ==========================================
    // Password reset
    // ==========================================

    /// Request a password-reset email.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<()> {
        self.request(
            Method::POST,
            "password-reset",
            Some(json!({ "email": email })),
        )
        .await?;
        Ok(())
    }

    /// Confirm a password reset with the emailed token.
    pub async fn confirm_password_reset(&self, password: &str, token: &str) -> ApiResult<()> {
        self.request(
            Method::POST,
            "password-reset/reset",
            Some(json!({ "password": password, "token": token })),
        )
        .await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    Ok(serde_json::from_value(value)?)
}
