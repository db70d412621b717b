//! Storage key constants.

/// Storage keys used by the client engine
pub struct StorageKeys;

impl StorageKeys {
    /// Access credential cookie name
    pub const ACCESS_TOKEN: &'static str = "accessToken";

    /// Refresh credential key in the durable key-value store
    pub const REFRESH_TOKEN: &'static str = "refreshToken";

    /// Transient flag set while a password reset is in progress
    pub const RESET_IN_PROGRESS: &'static str = "resetPassword";
}
