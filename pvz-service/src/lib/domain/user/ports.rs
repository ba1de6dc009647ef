use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for registration, login and token issuance.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `email` - Raw email address
    /// * `password` - Plaintext password (hashed before storage)
    /// * `role` - Raw role name
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `InvalidRole` / `InvalidEmail` / `EmptyPassword` - Input rejected before any store access
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Store` - Store operation failed
    async fn register(&self, email: &str, password: &str, role: &str) -> Result<User, UserError>;

    /// Verify credentials and issue a token for the stored role.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TokenIssuance` - Token could not be issued
    /// * `Store` - Store operation failed
    async fn login(&self, email: &str, password: &str) -> Result<String, UserError>;

    /// Issue a token for `role` without checking credentials.
    ///
    /// # Errors
    /// * `RoleNotIssuable` - Role is not one of the known roles
    /// * `TokenIssuance` - Token could not be issued
    fn generate_token(&self, role: &str) -> Result<String, UserError>;

    /// Resolve the role asserted by a bearer token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is forged, malformed, expired or names an unknown role
    fn validate_token(&self, token: &str) -> Result<Role, UserError>;
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Store` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Store` - Store operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn delete(&self, id: UserId) -> Result<(), UserError>;
}
