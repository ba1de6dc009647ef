use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::errors::ErrorKind;
use crate::domain::errors::StoreError;

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for registration, login and token operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    // Input validation errors (automatically converted via #[from])
    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    EmailAlreadyExists(String),

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Credential-less issuance asked for a role outside the known set.
    #[error("Token cannot be issued: {0}")]
    RoleNotIssuable(RoleError),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidRole(_) | UserError::InvalidEmail(_) | UserError::EmptyPassword => {
                ErrorKind::Validation
            }
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::EmailAlreadyExists(_) => ErrorKind::Conflict,
            UserError::InvalidCredentials
            | UserError::InvalidToken(_)
            | UserError::RoleNotIssuable(_) => ErrorKind::Auth,
            UserError::Password(_) | UserError::TokenIssuance(_) => ErrorKind::Internal,
            UserError::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<TokenError> for UserError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid(_) => UserError::InvalidToken(err.to_string()),
            TokenError::InvalidDuration { .. } | TokenError::SigningFailed(_) => {
                UserError::TokenIssuance(err.to_string())
            }
        }
    }
}
