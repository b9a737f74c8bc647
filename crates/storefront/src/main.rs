//! SmartCart Storefront - client-side shop, server edition.
//!
//! This binary serves the storefront's page controllers on port 3000.
//!
//! # Architecture
//!
//! - Axum page controllers returning JSON view models
//! - Static catalog JSON fetched once per process, with fallback data
//! - Cart and theme persisted write-through to a key-value storage file
//!
//! The process is long-lived; after startup no error is fatal. Catalog
//! failures degrade to fallback data, storage failures surface as 500s on
//! the affected request, and everything else keeps serving.

#![cfg_attr(not(test), forbid(unsafe_code))]

use smartcart_storefront::config::StorefrontConfig;
use smartcart_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "smartcart_storefront=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Build application state: open durable storage, restore cart + theme
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    // Load the catalog eagerly so the first page render never waits on the
    // fetch; failures fall back to the built-in catalog.
    let catalog_len = state.catalog().load().await.len();
    tracing::info!(products = catalog_len, "Catalog ready");

    // Build router
    let app = smartcart_storefront::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
