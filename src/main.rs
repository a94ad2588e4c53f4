//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Builds the Notion client once for the whole process
//! - Starts the HTTP server with graceful shutdown support

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gallery::config::Config;
use gallery::database::AppState;
use gallery::notion::NotionClient;
use gallery::route::create_app;

/// Application entry point
///
/// 1. Loads environment variables from .env file
/// 2. Reads configuration (see [`gallery::config`])
/// 3. Creates the Notion client shared by every request
/// 4. Creates the application state and router
/// 5. Starts the HTTP server with graceful shutdown handling
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gallery=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    // One client for the lifetime of the process
    let client = NotionClient::new(&config.notion).expect("Failed to build Notion client");

    let state = AppState::new(client).with_max_pages(config.max_pages);

    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind listener");

    info!(port = config.port, database = %config.notion.database_id, "gallery server running");
    if let Some(cap) = config.max_pages {
        info!(max_pages = cap, "upstream paging capped");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Handles graceful shutdown signals
///
/// Returns on SIGINT (Ctrl+C) or, on Unix, SIGTERM. In-flight requests are
/// allowed to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
