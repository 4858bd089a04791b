//! Durable storage key layout for the persisted session snapshot.

use serde::{Deserialize, Serialize};

/// Default key for the JSON-encoded user record.
pub const USER_KEY: &str = "user";
/// Default key for the JSON-encoded merchant record.
pub const MERCHANT_KEY: &str = "merchant";
/// Default key for the raw session token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Names of the three independent durable entries that mirror the session.
pub struct SessionKeys {
    /// Key holding the JSON-encoded user record.
    pub user: String,
    /// Key holding the JSON-encoded merchant record.
    pub merchant: String,
    /// Key holding the raw token string.
    pub token: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            user: USER_KEY.to_string(),
            merchant: MERCHANT_KEY.to_string(),
            token: TOKEN_KEY.to_string(),
        }
    }
}

impl SessionKeys {
    /// Builds the default key set with every key prefixed, for hosts sharing one origin.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            user: format!("{prefix}{USER_KEY}"),
            merchant: format!("{prefix}{MERCHANT_KEY}"),
            token: format!("{prefix}{TOKEN_KEY}"),
        }
    }
}
