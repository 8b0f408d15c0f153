//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration into a single Config struct
//! - Initializes the database
//! - Starts the HTTP server with graceful shutdown support

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

// Module declarations
mod auth;
mod config;
mod database;
mod error;
mod handler;
mod model;
mod route;
mod useragent;

use config::Config;
use database::{init_db, AppState};
use route::create_app;

/// Application entry point
///
/// This asynchronous main function:
/// 1. Loads environment variables from .env file
/// 2. Resolves the configuration once into a Config struct
/// 3. Initializes the embedded database
/// 4. Creates the application state and router
/// 5. Starts the HTTP server with graceful shutdown handling
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("tinylink=debug,tower_http=debug")
        .init();

    // Resolve all configuration up front; nothing reads the environment later
    let config = Config::from_env();

    // Initialize the embedded database with the specified path
    let db = init_db(&config.database_url).expect("Failed to initialize database");

    let addr = format!("0.0.0.0:{}", config.port);
    let db_name = config.database_url.clone();

    // Create application state shared across all handlers
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    };

    // Create the Axum router with all routes configured
    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let listener = TcpListener::bind(&addr).await.unwrap();

    // Print startup information
    println!("🚀 Server running at http://{}", addr);
    println!("📂 Using database: {}", db_name);

    // Start the server with graceful shutdown support
    // The server will continue running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Handles graceful shutdown signals
///
/// Listens for SIGINT (Ctrl+C) and, on Unix, SIGTERM, and returns when one
/// is received so the server can drain connections and close the database
/// cleanly. Detached click-event writes still in flight may be lost; the
/// redirect path makes no durability promise for them.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
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

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
