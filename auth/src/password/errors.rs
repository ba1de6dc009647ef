use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a PHC string this hasher understands.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
