use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Carries a single role claim plus the registered `iat`/`exp` timestamps.
/// There is no subject: tokens assert a role, not an identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Role the bearer acts as
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `role` issued at `now` and valid for `ttl`.
    pub fn for_role(role: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
