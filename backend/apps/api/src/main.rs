//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-time failures are logged by the
//! crates' own error types and never leave the gateway.

mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{
    AccountRepository, AuthConfig, CredentialStore, InMemoryAccountRepository,
    PgAccountRepository, TokenService,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use gateway::{
    AccessLogRepository, Dispatcher, InMemoryAccessLogRepository, PgAccessLogRepository,
    gateway_router,
};
use platform::password::PasswordHasher;
use platform::secret::SecretProvider;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracking::{
    InMemoryStageRecordRepository, PgStageRecordRepository, RecordStore, StageRecordRepository,
    TrackingConfig,
};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,gateway=info,auth=info,tracking=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Without the pepper no password can be hashed and no token signed.
    let secret = SecretProvider::from_env().context("Refusing to start without a secret")?;

    let auth_config = match config.token_ttl_secs {
        Some(secs) => AuthConfig::with_token_ttl_secs(secs),
        None => AuthConfig::default(),
    };
    let stores = Stores {
        secret,
        auth_config,
        tracking_config: TrackingConfig::default(),
    };

    let gateway = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            stores.into_router(
                PgAccountRepository::new(pool.clone()),
                PgStageRecordRepository::new(pool.clone()),
                PgAccessLogRepository::new(pool),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
            stores.into_router(
                InMemoryAccountRepository::new(),
                InMemoryStageRecordRepository::new(),
                InMemoryAccessLogRepository::new(),
            )
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .merge(gateway)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Everything the dispatcher needs besides its repositories
struct Stores {
    secret: SecretProvider,
    auth_config: AuthConfig,
    tracking_config: TrackingConfig,
}

impl Stores {
    fn into_router<A, S, L>(self, accounts: A, records: S, access_log: L) -> Router
    where
        A: AccountRepository + Send + Sync + 'static,
        S: StageRecordRepository + Send + Sync + 'static,
        L: AccessLogRepository + Send + Sync + 'static,
    {
        let dispatcher = Dispatcher::new(
            CredentialStore::new(
                Arc::new(accounts),
                PasswordHasher::new(self.secret.clone()),
            ),
            TokenService::new(self.secret, &self.auth_config),
            RecordStore::new(Arc::new(records), self.tracking_config),
            Arc::new(access_log),
        );
        gateway_router(dispatcher)
    }
}
