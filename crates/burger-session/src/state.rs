//! Observable session state and its per-operation reducers.
//!
//! The appliers reproduce the exact observable contract of each operation's
//! pending/fulfilled/rejected phases, including the fixed fallback strings
//! surfaced when a failure carries no message text.

use burger_api::User;
use serde::{Deserialize, Serialize};

/// Fallback shown when a profile fetch fails without a message.
pub const PROFILE_FETCH_FALLBACK: &str = "Failed to fetch user data";
/// Fallback shown when registration fails without a message.
pub const REGISTER_FALLBACK: &str = "Failed to fetch register user ";
/// Fallback shown when login fails without a message.
pub const LOGIN_FALLBACK: &str = "Failed to fetch Log in user ";
/// Fallback shown when logout fails without a message.
pub const LOGOUT_FALLBACK: &str = "Failed to fetch Log Out user ";
/// Fallback shown when a profile update fails without a message.
pub const UPDATE_FALLBACK: &str = "Failed to fetch update user";

/// Session state as UI collaborators observe it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether the initial auth determination has completed (successfully or
    /// not). Monotonic within a session: once true, never reset.
    pub is_auth_verified: bool,
    pub is_logged_in: bool,
    /// `None` unless authenticated. `is_logged_in == true` implies `Some`.
    pub current_user: Option<User>,
    pub auth_error: Option<String>,
    pub is_auth_loading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally mark the auth determination as complete.
    pub fn mark_verified(&mut self) {
        self.is_auth_verified = true;
    }

    // ==========================================
    // Profile fetch
    // ==========================================

    pub fn profile_fetch_pending(&mut self) {
        self.is_logged_in = false;
        self.auth_error = None;
        self.current_user = None;
        self.is_auth_loading = true;
    }

    pub fn profile_fetch_fulfilled(&mut self, user: User) {
        self.is_logged_in = true;
        self.current_user = Some(user);
        self.is_auth_verified = true;
        self.is_auth_loading = false;
    }

    pub fn profile_fetch_rejected(&mut self, message: Option<String>) {
        self.auth_error = Some(message.unwrap_or_else(|| PROFILE_FETCH_FALLBACK.to_string()));
        self.is_logged_in = false;
        self.current_user = None;
        self.is_auth_verified = true;
        self.is_auth_loading = false;
    }

    // ==========================================
    // Registration
    // ==========================================

    pub fn register_pending(&mut self) {
        self.is_logged_in = false;
        self.current_user = None;
        self.auth_error = None;
        self.is_auth_loading = true;
    }

    pub fn register_fulfilled(&mut self, user: User) {
        self.is_logged_in = true;
        self.current_user = Some(user);
        self.is_auth_loading = false;
    }

    /// Registration failure is not a definitive verification outcome, so it
    /// does not touch `is_auth_verified`.
    pub fn register_rejected(&mut self, message: Option<String>) {
        self.is_logged_in = false;
        self.auth_error = Some(message.unwrap_or_else(|| REGISTER_FALLBACK.to_string()));
        self.is_auth_loading = false;
    }

    // ==========================================
    // Login
    // ==========================================

    pub fn login_pending(&mut self) {
        self.auth_error = None;
        self.is_auth_loading = true;
    }

    pub fn login_fulfilled(&mut self, user: User) {
        self.is_logged_in = true;
        self.current_user = Some(user);
        self.is_auth_loading = false;
        self.is_auth_verified = true;
    }

    /// A failed login is itself a definitive verification outcome.
    pub fn login_rejected(&mut self, message: Option<String>) {
        self.is_auth_loading = false;
        self.is_logged_in = false;
        self.auth_error = Some(message.unwrap_or_else(|| LOGIN_FALLBACK.to_string()));
        self.is_auth_verified = true;
    }

    // ==========================================
    // Logout
    // ==========================================

    pub fn logout_pending(&mut self) {
        self.is_logged_in = true;
        self.is_auth_loading = true;
    }

    pub fn logout_fulfilled(&mut self) {
        self.is_logged_in = false;
        self.is_auth_loading = false;
        self.current_user = None;
    }

    /// Locally logged out regardless of what the server said.
    pub fn logout_rejected(&mut self, message: Option<String>) {
        self.is_logged_in = false;
        self.is_auth_loading = false;
        self.auth_error = Some(message.unwrap_or_else(|| LOGOUT_FALLBACK.to_string()));
    }

    // ==========================================
    // Profile update
    // ==========================================

    pub fn update_pending(&mut self) {
        self.is_logged_in = true;
        self.is_auth_loading = true;
    }

    pub fn update_fulfilled(&mut self, user: User) {
        self.is_logged_in = true;
        self.current_user = Some(user);
        self.is_auth_loading = false;
    }

    /// The current user is left untouched on a failed update.
    pub fn update_rejected(&mut self, message: Option<String>) {
        self.auth_error = Some(message.unwrap_or_else(|| UPDATE_FALLBACK.to_string()));
        self.is_auth_loading = false;
    }
}
