use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenError;
use crate::token::TokenManager;

/// Authentication coordinator combining credential hashing and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_manager: TokenManager,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_duration` - Token lifetime in humantime syntax (`24h`)
    pub fn new(jwt_secret: &[u8], token_duration: impl Into<String>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_manager: TokenManager::new(jwt_secret, token_duration),
        }
    }

    /// Replace the password hasher, e.g. with one built from configured cost.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `role`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `role` - Role claim to embed in the issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        role: &str,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_manager.generate(role)?)
    }

    /// Issue a token for `role` without any credential check.
    ///
    /// Callers are responsible for deciding that `role` may be asserted.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, role: &str) -> Result<String, TokenError> {
        self.token_manager.generate(role)
    }

    /// Validate a bearer token and return the role it asserts.
    ///
    /// # Errors
    /// * `TokenError` - Token is expired, forged or malformed
    pub fn validate_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_manager.validate(token)
    }
}
