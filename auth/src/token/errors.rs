use thiserror::Error;

use crate::jwt::JwtError;

/// Error type for bearer token issuance and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The configured token lifetime could not be parsed.
    #[error("Invalid token duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => TokenError::SigningFailed(msg),
            JwtError::TokenExpired => TokenError::Expired,
            JwtError::InvalidToken(msg) => TokenError::Invalid(msg),
        }
    }
}
