#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::HashingCost;
use auth::PasswordHasher;
use pvz_service::domain::pvz::ports::PvzServicePort;
use pvz_service::domain::pvz::service::PvzService;
use pvz_service::domain::user::ports::AuthServicePort;
use pvz_service::domain::user::service::AuthService;
use pvz_service::inbound::http::router::create_router;
use pvz_service::outbound::repositories::InMemoryStore;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Cheap Argon2 parameters so tests don't spend seconds hashing.
pub fn test_authenticator() -> Arc<Authenticator> {
    let hasher = PasswordHasher::with_cost(HashingCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build password hasher");

    Arc::new(Authenticator::new(JWT_SECRET, "1h").with_password_hasher(hasher))
}

/// Services wired over a fresh in-memory store.
pub fn in_memory_services() -> (Arc<dyn AuthServicePort>, Arc<dyn PvzServicePort>) {
    let store = Arc::new(InMemoryStore::new());

    let auth_service: Arc<dyn AuthServicePort> =
        Arc::new(AuthService::new(Arc::clone(&store), test_authenticator()));
    let pvz_service: Arc<dyn PvzServicePort> = Arc::new(PvzService::new(store));

    (auth_service, pvz_service)
}

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let (auth_service, pvz_service) = in_memory_services();
        let router = create_router(auth_service, pvz_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Token for `role` via the public dummy login
    pub async fn token_for(&self, role: &str) -> String {
        let response = self
            .post("/dummyLogin")
            .json(&json!({ "role": role }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response.json().await.expect("Failed to parse token")
    }

    /// Register a PVZ as moderator and return its id
    pub async fn create_pvz(&self, city: &str) -> String {
        let moderator = self.token_for("moderator").await;
        let response = self
            .post_authenticated("/pvz", &moderator)
            .json(&json!({ "city": city }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("PVZ id missing").to_string()
    }
}
