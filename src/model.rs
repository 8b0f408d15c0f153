//! Data models for the link shortener
//!
//! This module defines all data structures used throughout the application:
//! stored records, request payloads, and response shapes. API payloads use
//! camelCase field names; stored records keep Rust naming and are persisted
//! as JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link stored in the database
///
/// Keyed by its short code in the main table. The click counter is
/// denormalized here and incremented on every successful redirect; click
/// events are stored separately in an append-only table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinkRecord {
    /// Unique short code identifying this link (random or caller-supplied)
    pub short_code: String,

    /// Identifier of the user who created the link
    pub user_id: String,

    /// The destination URL, stored verbatim (no validation)
    pub original_url: String,

    /// The caller-supplied alias, if one was given
    pub custom_alias: Option<String>,

    /// Timestamp when this link was created
    pub created_at: DateTime<Utc>,

    /// Optional expiration; once passed, redirects answer 410 Gone
    pub expiration_date: Option<DateTime<Utc>>,

    /// Number of successful redirects through this link
    #[serde(default)]
    pub clicks: u64,
}

impl LinkRecord {
    /// Whether the link's expiration timestamp, if any, has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| now > expires)
    }
}

/// One recorded visit to a short link
///
/// Append-only: created once per successful redirect, never updated or
/// deleted. References its link by short code.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClickRecord {
    /// Short code of the link that was visited
    pub short_code: String,

    /// When the visit happened
    pub timestamp: DateTime<Utc>,

    /// Originating address as reported by the request
    pub ip: String,

    /// Coarse device category parsed from the User-Agent (e.g. "pc")
    pub device: String,

    /// Browser name parsed from the User-Agent (e.g. "Firefox")
    pub browser: String,
}

/// Request payload for `POST /api/auth/login`
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    /// Signed bearer token to present on protected routes
    pub token: String,
}

/// Request payload for `POST /api/links/create`
///
/// # Example
/// ```json
/// {
///   "originalUrl": "https://example.com/very/long/url",
///   "customAlias": "my-link",
///   "expirationDate": "2026-12-31T00:00:00Z"
/// }
/// ```
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The destination URL to shorten
    pub original_url: String,

    /// Optional custom short code; used verbatim when non-empty
    pub custom_alias: Option<String>,

    /// Optional expiration timestamp
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Response returned after successfully creating a link
///
/// # Example
/// ```json
/// {
///   "message": "Short URL created",
///   "shortUrl": "http://localhost:8080/abc123"
/// }
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub message: String,

    /// The complete shortened URL
    pub short_url: String,
}

/// Per-link analytics entry in the dashboard response
///
/// # Example
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "shortUrl": "http://localhost:8080/abc123",
///   "createdAt": "2026-01-17T13:40:00Z",
///   "expirationDate": null,
///   "clicks": 2,
///   "expired": false,
///   "clicksOverTime": { "2026-01-17": 2 },
///   "deviceBreakdown": { "pc": 2 }
/// }
/// ```
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,

    /// Current value of the denormalized click counter
    pub clicks: u64,

    /// Derived at response time by comparing the expiration to now
    pub expired: bool,

    /// Calendar date (server-local, YYYY-MM-DD) -> click-event count
    pub clicks_over_time: BTreeMap<String, u64>,

    /// Device category -> click-event count
    pub device_breakdown: BTreeMap<String, u64>,
}
