//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use qamous_common::{AppConfig, AppError, JwtService};
use qamous_db::{
    create_pool, run_migrations, MemoryStore, PgDefinitionRepository, PgReactionRepository,
    PgUserRepository,
};
use qamous_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

fn jwt_service(config: &AppConfig) -> Arc<JwtService> {
    Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ))
}

/// Initialize all dependencies and create AppState
///
/// A `memory://` database url runs on a fresh in-process store.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    if config.database.is_memory() {
        info!("Using in-memory reaction store");
        return memory_app_state(config, MemoryStore::new());
    }

    info!("Connecting to PostgreSQL...");
    let db_config = qamous_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Migrations applied");

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .definition_repo(Arc::new(PgDefinitionRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool)))
        .jwt_service(jwt_service(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Create AppState over an existing in-memory store
pub fn memory_app_state(config: AppConfig, store: MemoryStore) -> Result<AppState, AppError> {
    let store = Arc::new(store);
    let service_context = ServiceContextBuilder::new()
        .user_repo(store.clone())
        .definition_repo(store.clone())
        .reaction_repo(store)
        .jwt_service(jwt_service(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
