use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for registration, login and token issuance.
///
/// Generic over the user store so tests can substitute a mock or the
/// in-memory adapter.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, email: &str, password: &str, role: &str) -> Result<User, UserError> {
        let role = Role::parse(role)?;
        let email = EmailAddress::new(email.trim().to_string())?;
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Registration rejected: email already registered");
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(password)?;

        let user = User {
            id: UserId::new(),
            email,
            password_hash,
            role,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, role = %created_user.role, "User registered");

        Ok(created_user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, UserError> {
        let Ok(email) = EmailAddress::new(email.trim().to_string()) else {
            return Err(UserError::InvalidCredentials);
        };

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        self.authenticator
            .authenticate(password, &user.password_hash, user.role.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Stored password hash is unreadable");
                    UserError::InvalidCredentials
                }
                AuthenticationError::TokenError(err) => UserError::from(err),
            })
    }

    fn generate_token(&self, role: &str) -> Result<String, UserError> {
        let role = Role::parse(role).map_err(UserError::RoleNotIssuable)?;

        Ok(self.authenticator.issue_token(role.as_str())?)
    }

    fn validate_token(&self, token: &str) -> Result<Role, UserError> {
        let role = self.authenticator.validate_token(token)?;

        Role::parse(&role).map_err(|e| UserError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::HashingCost;
    use auth::PasswordHasher;
    use auth::TokenManager;
    use mockall::mock;

    use super::*;
    use crate::domain::errors::ErrorKind;
    use crate::domain::errors::StoreError;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: UserId) -> Result<(), UserError>;
        }
    }

    fn authenticator_with_duration(duration: &str) -> Arc<Authenticator> {
        let hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Arc::new(Authenticator::new(SECRET, duration).with_password_hasher(hasher))
    }

    fn service(repository: MockTestUserRepository) -> AuthService<MockTestUserRepository> {
        AuthService::new(Arc::new(repository), authenticator_with_duration("24h"))
    }

    fn stored_user(password: &str, role: Role) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("worker@pvz.example".to_string()).unwrap(),
            password_hash: authenticator_with_duration("24h")
                .hash_password(password)
                .unwrap(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "worker@pvz.example")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "worker@pvz.example"
                    && user.role == Role::Employee
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let user = service(repository)
            .register("worker@pvz.example", "pass_word!", "employee")
            .await
            .expect("registration should succeed");

        assert_eq!(user.email.as_str(), "worker@pvz.example");
        assert_eq!(user.role, Role::Employee);
        assert_ne!(user.password_hash, "pass_word!");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let existing = stored_user("other", Role::Moderator);

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let result = service(repository)
            .register("worker@pvz.example", "pass_word!", "employee")
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, UserError::EmailAlreadyExists(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_duplicate_detected_by_store() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let result = service(repository)
            .register("worker@pvz.example", "pass_word!", "moderator")
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input_without_store_access() {
        // No expectations: any store call panics.
        let service = service(MockTestUserRepository::new());

        let err = service
            .register("worker@pvz.example", "pass_word!", "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidRole(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = service
            .register("not-an-email", "pass_word!", "employee")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidEmail(_)));

        let err = service
            .register("worker@pvz.example", "", "employee")
            .await
            .unwrap_err();
        assert_eq!(err, UserError::EmptyPassword);
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_stored_role() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("pass_word!", Role::Moderator);

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository);
        let token = service
            .login("worker@pvz.example", "pass_word!")
            .await
            .expect("login should succeed");

        assert_eq!(service.validate_token(&token), Ok(Role::Moderator));
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_are_indistinguishable() {
        let mut unknown = MockTestUserRepository::new();
        unknown.expect_find_by_email().returning(|_| Ok(None));

        let mut known = MockTestUserRepository::new();
        let user = stored_user("pass_word!", Role::Employee);
        known
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let unknown_err = service(unknown)
            .login("ghost@pvz.example", "pass_word!")
            .await
            .unwrap_err();
        let wrong_err = service(known)
            .login("worker@pvz.example", "wrong")
            .await
            .unwrap_err();

        assert_eq!(unknown_err, UserError::InvalidCredentials);
        assert_eq!(unknown_err, wrong_err);
        assert_eq!(wrong_err.kind(), ErrorKind::Auth);
    }

    #[tokio::test]
    async fn test_login_propagates_store_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(|_| Err(UserError::Store(StoreError::new("connection reset"))));

        let err = service(repository)
            .login("worker@pvz.example", "pass_word!")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[tokio::test]
    async fn test_login_with_unparsable_duration_is_internal() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("pass_word!", Role::Employee);
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator_with_duration("a while"));
        let err = service
            .login("worker@pvz.example", "pass_word!")
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::TokenIssuance(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_generate_token_for_every_role() {
        let service = service(MockTestUserRepository::new());

        for role in Role::ALL {
            let token = service.generate_token(role.as_str()).unwrap();
            assert_eq!(service.validate_token(&token), Ok(role));
        }
    }

    #[test]
    fn test_generate_token_rejects_unknown_role() {
        let service = service(MockTestUserRepository::new());

        let err = service.generate_token("superuser").unwrap_err();
        assert!(matches!(err, UserError::RoleNotIssuable(_)));
        assert_eq!(err.kind(), ErrorKind::Auth);
    }

    #[test]
    fn test_validate_token_rejects_unknown_role_claim() {
        let service = service(MockTestUserRepository::new());
        let token = TokenManager::new(SECRET, "1h").generate("superuser").unwrap();

        let err = service.validate_token(&token).unwrap_err();
        assert!(matches!(err, UserError::InvalidToken(_)));
        assert_eq!(err.kind(), ErrorKind::Auth);
    }

    #[test]
    fn test_validate_token_rejects_foreign_signature() {
        let service = service(MockTestUserRepository::new());
        let token = TokenManager::new(b"some-other-secret-key-of-32-bytes!!", "1h")
            .generate("employee")
            .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(UserError::InvalidToken(_))
        ));
    }
}
