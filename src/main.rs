//! Payform server binary.
//!
//! Startup order: configuration, logging, database pool (and migrations
//! when enabled), gateway adapter, router, listener.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use payform::adapters::http::{build_app, CheckoutAppState};
use payform::adapters::{HttpPaymentGateway, PostgresPaymentLogRepository};
use payform::application::{CheckoutSettings, GatewayClient};
use payform::config::{AppConfig, ConfigError, ValidationError};
use payform::domain::checkout::Signer;
use payform::ports::GatewayError;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Gateway client setup failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        shop_id = config.shop.shop_id,
        "Starting payform"
    );

    let pool = payform::adapters::postgres::create_pool(&config.database).await?;
    if config.database.run_migrations {
        payform::adapters::postgres::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let gateway = HttpPaymentGateway::new(&config.gateway)?;
    let gateway_client = GatewayClient::new(
        Signer::new(config.gateway.secret_key.clone()),
        Arc::new(gateway),
    );

    let state = CheckoutAppState::new(
        Arc::new(PostgresPaymentLogRepository::new(pool)),
        gateway_client,
        CheckoutSettings::from_config(&config),
    );
    let app = build_app(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
