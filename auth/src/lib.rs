//! Authentication utilities library
//!
//! Provides the credential and bearer-token primitives used by the PVZ service:
//! - Password hashing (Argon2id)
//! - JWT encoding/decoding (HS256)
//! - Role-bearing token issuance and validation with a configured lifetime
//! - Authentication coordination
//!
//! Nothing here knows about the service's domain: roles travel as plain
//! strings and the service decides which ones exist.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenManager;
//!
//! let tokens = TokenManager::new(b"secret_key_at_least_32_bytes_long!", "24h");
//! let token = tokens.generate("employee").unwrap();
//! assert_eq!(tokens.validate(&token).unwrap(), "employee");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", "24h");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token for the stored role
//! let token = auth.authenticate("password123", &hash, "moderator").unwrap();
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&token).unwrap(), "moderator");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::TokenManager;
