//! Gateway server setup
//!
//! Provides the main WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use crate::events::{DispatchContext, Dispatcher};
use crate::handlers::default_registry;
use account_common::{AppConfig, AppError};
use account_core::AccountRepository;
use account_db::{MemoryAccountRepository, PgAccountRepository};
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::trace::TraceLayer;

/// How often expired rate limit buckets are swept
const LIMITER_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Create the gateway router
pub fn create_router(gateway_path: &str) -> Router<GatewayState> {
    Router::new()
        .route(gateway_path, get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
///
/// Handshakes are throttled globally; events on an open socket are
/// rate limited per connection by the dispatcher instead.
pub fn create_app(state: GatewayState) -> Result<Router, AppError> {
    let handshake = &state.config().gateway.handshake;
    let replenish_ms = 1000 / u64::from(handshake.per_second.max(1));

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms.max(1))
            .burst_size(handshake.burst.max(1))
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .ok_or_else(|| AppError::config("invalid handshake rate limit"))?,
    );

    let path = state.config().gateway.path.clone();

    Ok(create_router(&path)
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .with_state(state))
}

/// Pick the account store: PostgreSQL when configured, memory otherwise
async fn create_account_repository(
    config: &AppConfig,
) -> Result<Arc<dyn AccountRepository>, AppError> {
    let Some(database) = &config.database else {
        tracing::warn!("DATABASE_URL not set, accounts are kept in memory");
        return Ok(Arc::new(MemoryAccountRepository::new()));
    };

    tracing::info!("Connecting to PostgreSQL...");
    let pool = account_db::create_pool(database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    account_db::ensure_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established");

    Ok(Arc::new(PgAccountRepository::new(pool)))
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let accounts = create_account_repository(&config).await?;

    let registry = default_registry().map_err(AppError::config)?;
    tracing::debug!(events = registry.len(), "Event registry built");

    let context = DispatchContext::new(Arc::new(config), accounts);
    if context.limiters().is_enabled() {
        context.limiters().clone().spawn_sweeper(LIMITER_SWEEP_INTERVAL);
    } else {
        tracing::info!("Test mode: event rate limiting disabled");
    }

    Ok(GatewayState::new(Dispatcher::new(registry, context)))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: &str, gateway_path: &str) -> Result<(), AppError> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}{}", addr, gateway_path);

    serve(listener, app).await
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.gateway.address();
    let gateway_path = config.gateway.path.clone();

    let state = create_gateway_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr, &gateway_path).await
}
