//! Process-wide configuration
//!
//! All tunables are resolved exactly once at startup from environment
//! variables (optionally loaded from a `.env` file) into a plain struct
//! carried inside the application state. Every field has a default so the
//! binary runs with zero setup.

use std::env;

/// Immutable configuration resolved at process start
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `URL` - Public base URL used when building short links (default: "http://localhost")
/// - `DATABASE_URL` - Path to the database file (default: "data.db")
/// - `JWT_SECRET` - HS256 signing secret for session tokens
/// - `LOGIN_EMAIL` / `LOGIN_PASSWORD` - The single accepted credential pair
/// - `USER_ID` - Owner identifier embedded in issued tokens
#[derive(Clone, Debug)]
pub struct Config {
    /// Server port number
    pub port: u16,

    /// Public base URL (scheme + host, without port)
    pub base_url: String,

    /// Path to the embedded database file
    pub database_url: String,

    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,

    /// The only email accepted by the login endpoint
    pub login_email: String,

    /// The only password accepted by the login endpoint
    pub login_password: String,

    /// User identifier recorded as the owner of created links
    pub user_id: String,
}

impl Config {
    /// Builds the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        Self {
            port,
            base_url: env::var("URL").unwrap_or_else(|_| "http://localhost".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "data.db".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "micro-saas-secret".to_string()),
            login_email: env::var("LOGIN_EMAIL")
                .unwrap_or_else(|_| "intern@dacoid.com".to_string()),
            login_password: env::var("LOGIN_PASSWORD").unwrap_or_else(|_| "Test123".to_string()),
            user_id: env::var("USER_ID").unwrap_or_else(|_| "intern123".to_string()),
        }
    }

    /// The externally reachable base of every short URL, e.g.
    /// `http://localhost:8080`
    pub fn public_base(&self) -> String {
        format!("{}:{}", self.base_url, self.port)
    }
}
