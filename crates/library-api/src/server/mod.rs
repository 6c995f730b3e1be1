//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use library_common::{AppConfig, AppError, AppResult, JwtService};
use library_db::{
    create_pool, run_migrations, PgAuthorRepository, PgBookRepository, PgCategoryRepository,
    PgLoanRepository, PgMemberRepository, PgStateRepository, PgTransactionRepository,
    PoolSettings,
};
use library_service::{ServiceContextBuilder, StateService};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Connect, migrate, seed the state registry and wire the repositories
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolSettings::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let migrations_dir = config.database.migrations_dir.as_ref().map(PathBuf::from);
    run_migrations(&pool, migrations_dir.as_deref())
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    info!("Database schema is up to date");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .state_repo(Arc::new(PgStateRepository::new(pool.clone())))
        .transaction_repo(Arc::new(PgTransactionRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .author_repo(Arc::new(PgAuthorRepository::new(pool.clone())))
        .category_repo(Arc::new(PgCategoryRepository::new(pool.clone())))
        .book_repo(Arc::new(PgBookRepository::new(pool.clone())))
        .loan_repo(Arc::new(PgLoanRepository::new(pool)))
        .jwt_service(jwt_service)
        .library(config.library.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let states = StateService::new(&service_context)
        .ensure_registry()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!(count = states.len(), "State registry ready");

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses feed the ClientIp fallback
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, &addr).await
}
