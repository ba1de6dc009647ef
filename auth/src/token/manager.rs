use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::errors::TokenError;
use crate::jwt::Claims;
use crate::jwt::JwtHandler;

/// Issues and validates role-bearing bearer tokens.
///
/// Stateless: a token's validity is a function of the signing secret, the
/// token itself and the current time. The lifetime is kept in its configured
/// textual form (`24h`, `90m`, `1h 30m`) and parsed on every issuance, so a
/// bad value surfaces as [`TokenError::InvalidDuration`] at the call site.
pub struct TokenManager {
    jwt_handler: JwtHandler,
    duration: String,
}

impl TokenManager {
    /// Create a token manager.
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret
    /// * `duration` - Token lifetime in humantime syntax
    pub fn new(secret: &[u8], duration: impl Into<String>) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            duration: duration.into(),
        }
    }

    /// Issue a token asserting `role`, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `InvalidDuration` - Configured lifetime is unparsable, zero or out of range
    /// * `SigningFailed` - Token could not be signed
    pub fn generate(&self, role: &str) -> Result<String, TokenError> {
        self.generate_at(role, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn generate_at(&self, role: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_role(role, now, self.ttl()?);
        Ok(self.jwt_handler.encode(&claims)?)
    }

    /// Verify a token and return the role it asserts.
    ///
    /// # Errors
    /// * `Expired` - Signature verifies but the token is past its expiry
    /// * `Invalid` - Forged, malformed or otherwise unverifiable token
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let claims: Claims = self.jwt_handler.decode(token)?;
        Ok(claims.role)
    }

    fn ttl(&self) -> Result<Duration, TokenError> {
        let invalid = |reason: String| TokenError::InvalidDuration {
            value: self.duration.clone(),
            reason,
        };

        let parsed = humantime::parse_duration(self.duration.trim())
            .map_err(|e| invalid(e.to_string()))?;
        if parsed.is_zero() {
            return Err(invalid("duration must be positive".to_string()));
        }

        Duration::from_std(parsed).map_err(|e| invalid(e.to_string()))
    }
}
