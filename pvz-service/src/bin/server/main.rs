use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use pvz_service::config::Config;
use pvz_service::config::StorageBackend;
use pvz_service::domain::pvz::ports::PvzServicePort;
use pvz_service::domain::pvz::service::PvzService;
use pvz_service::domain::user::ports::AuthServicePort;
use pvz_service::domain::user::service::AuthService;
use pvz_service::inbound::http::router::create_router;
use pvz_service::outbound::repositories::InMemoryStore;
use pvz_service::outbound::repositories::PostgresPvzRepository;
use pvz_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pvz_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "pvz-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage_backend = ?config.storage.backend,
        token_duration = %config.jwt.token_duration,
        "Configuration loaded"
    );

    let password_hasher = match &config.password {
        Some(password) => PasswordHasher::with_cost(password.hashing_cost())?,
        None => PasswordHasher::new(),
    };
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes(), config.jwt.token_duration.clone())
            .with_password_hasher(password_hasher),
    );

    let (auth_service, pvz_service): (Arc<dyn AuthServicePort>, Arc<dyn PvzServicePort>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(&config.database.url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
                    Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                    authenticator,
                ));
                let pvz_service: Arc<dyn PvzServicePort> =
                    Arc::new(PvzService::new(Arc::new(PostgresPvzRepository::new(pg_pool))));
                (auth_service, pvz_service)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                let store = Arc::new(InMemoryStore::new());
                let auth_service: Arc<dyn AuthServicePort> =
                    Arc::new(AuthService::new(Arc::clone(&store), authenticator));
                let pvz_service: Arc<dyn PvzServicePort> = Arc::new(PvzService::new(store));
                (auth_service, pvz_service)
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service, pvz_service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
