//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{db::DbAdapter, memory::InMemoryLedger},
    config::{Config, LedgerBackend},
    error::ApiError,
    web::{rest::ApiDoc, router, state::AppState},
};
use footprint_core::ports::LedgerService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Ledger ---
    let ledger: Arc<dyn LedgerService> = match &config.ledger {
        LedgerBackend::Postgres { database_url } => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .acquire_timeout(config.ledger_timeout)
                .connect(database_url)
                .await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        LedgerBackend::Memory => {
            warn!("Using the in-memory ledger; history is lost on restart.");
            Arc::new(InMemoryLedger::new())
        }
    };

    // --- 3. Build the Shared AppState and Router ---
    let app_state = Arc::new(AppState::new(ledger, config.clone()));

    // Merge the API router with the Swagger UI router for a complete application.
    let app = router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
