//! Route definitions for the link shortener API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers, wiring the authentication middleware around the protected ones.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::require_auth;
use crate::database::AppState;
use crate::handler::{create_link, dashboard, index, login, redirect_link};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Single-page frontend (public endpoint)
/// - `GET /{code}` - Redirects to the original URL (public endpoint)
/// - `POST /api/auth/login` - Issues a session token (public endpoint)
/// - `POST /api/links/create` - Creates a new short link (bearer-authenticated)
/// - `GET /api/links/dashboard` - Per-link click analytics (bearer-authenticated)
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use tinylink::config::Config;
/// # use tinylink::database::{init_db, AppState};
/// # use tinylink::route::create_app;
/// # let config = Config::from_env();
/// # let db = init_db(&config.database_url).unwrap();
/// let state = AppState { db: Arc::new(db), config: Arc::new(config) };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    // Routes that require a valid bearer token
    let protected = Router::new()
        .route("/links/create", post(create_link))
        .route("/links/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/auth/login", post(login))
        .merge(protected);

    Router::new()
        // Frontend page with the login, creation, and analytics views
        .route("/", get(index))
        // Public redirect endpoint - resolves a short code to its destination
        .route("/{code}", get(redirect_link))
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
