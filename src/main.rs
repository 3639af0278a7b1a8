// Initialize configuration
// Set up logging
// Create database connection pool
// Wire up limiter, upstream client and lookup services
// Start HTTP server with graceful shutdown

use btc_info_service::{
    api, cache::CacheStore, config::Config, db, limiter::LookupLimiter,
    service::LookupService, state::AppState, upstream::UpstreamClient,
};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting btc-info-service");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Setup database connection
    let db_pool = db::connection::establish_connection(&config.database_url).await?;
    info!("Database connection established");

    // Wire up the shared components once and inject them into both services
    let store = CacheStore::new(db_pool);
    let limiter = Arc::new(LookupLimiter::new(&config));
    let upstream = Arc::new(UpstreamClient::new(&config)?);

    let state = Arc::new(AppState {
        address_service: LookupService::new(store.clone(), limiter.clone(), upstream.clone()),
        transaction_service: LookupService::new(store, limiter, upstream),
        config,
    });

    // Propagate ctrl-c into a cancellation signal for in-flight requests
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    // Start HTTP server
    let app = api::create_router(state.clone());
    let addr = format!("{}:{}", state.config.server_host, state.config.server_port);
    info!("Starting server on {}", addr);
    info!("Using upstream endpoint: {}", state.config.upstream_endpoint);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown.cancelled_owned())
    .await?;

    Ok(())
}
