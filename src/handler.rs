//! HTTP request handlers for the link shortener API
//!
//! This module implements all the core business logic for:
//! - Logging in against the configured credential pair
//! - Creating short links with custom or random codes
//! - Redirecting short links while counting and recording the visit
//! - Aggregating click analytics for the dashboard

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Extension, Json,
};
use chrono::{Local, Utc};
use rand::{distr::Alphanumeric, Rng};
use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::warn;

use crate::auth::Claims;
use crate::database::{
    click_key, prefix_range, user_index_key, AppState, TABLE_CLICKS, TABLE_LINKS, TABLE_USER_INDEX,
};
use crate::error::ApiError;
use crate::model::{
    ClickRecord, CreateLinkRequest, CreateLinkResponse, LinkRecord, LinkSummary, LoginRequest,
    LoginResponse,
};
use crate::useragent;

/// Serves the single-page frontend
///
/// One embedded HTML document carrying the login form, the link-creation
/// form, and the analytics view; it talks to the JSON API with the bearer
/// token held in memory.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Authenticates the single configured credential pair
///
/// On a match, returns a signed token carrying `{email, userId}`. Anything
/// else is 401 Unauthorized. There is no user store, lockout, or rate limit.
///
/// # Request Body
///
/// ```json
/// { "email": "intern@dacoid.com", "password": "Test123" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email != state.config.login_email
        || payload.password != state.config.login_password
    {
        return Err(ApiError::InvalidCredentials);
    }

    let claims = Claims {
        email: payload.email,
        user_id: state.config.user_id.clone(),
    };
    let token = claims.sign(&state.config.jwt_secret)?;

    Ok(Json(LoginResponse { token }))
}

/// Creates a new short link owned by the authenticated caller
///
/// A non-empty `customAlias` is used verbatim as the short code; otherwise a
/// random 6-character alphanumeric code is generated. The destination URL is
/// stored as-is with no validation; the only character rejected in an alias
/// is ':', which is reserved by the composite-key scheme. A code already
/// present in the link table is rejected with 409 Conflict rather than
/// overwritten.
///
/// # Response
///
/// - **201 Created** - `{message, shortUrl}`
/// - **400 Bad Request** - alias contains ':'
/// - **409 Conflict** - short code already exists
///
/// # Database Operations
///
/// Writes the record to `TABLE_LINKS` and an entry to `TABLE_USER_INDEX`
/// inside one transaction, so the dashboard index never leads or trails the
/// main table.
pub async fn create_link(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Treat an empty alias the same as no alias
    let custom_alias = payload.custom_alias.filter(|alias| !alias.is_empty());

    // ':' separates the code from the timestamp in the click-log and index
    // keys; a code containing it would blend into a neighboring code's range
    if let Some(alias) = &custom_alias {
        if alias.contains(':') {
            return Err(ApiError::InvalidAlias);
        }
    }

    let code: String = match &custom_alias {
        Some(alias) => alias.clone(),
        None => rand::rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(char::from)
            .collect(),
    };

    let record = LinkRecord {
        short_code: code.clone(),
        user_id: claims.user_id,
        original_url: payload.original_url,
        custom_alias,
        created_at: Utc::now(),
        expiration_date: payload.expiration_date,
        clicks: 0,
    };
    let record_json = serde_json::to_string(&record)?;

    let write_txn = state.db.begin_write()?;
    {
        let mut links = write_txn.open_table(TABLE_LINKS)?;

        if links.get(code.as_str())?.is_some() {
            return Err(ApiError::AliasTaken);
        }
        links.insert(code.as_str(), record_json.as_str())?;

        let index_key = user_index_key(
            &record.user_id,
            record.created_at.timestamp_micros(),
            &code,
        );
        let mut index = write_txn.open_table(TABLE_USER_INDEX)?;
        index.insert(index_key.as_str(), code.as_str())?;
    }
    write_txn.commit()?;

    let response = CreateLinkResponse {
        message: "Short URL created".to_string(),
        short_url: format!("{}/{}", state.config.public_base(), code),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Redirects a short code to its original destination
///
/// Resolution order:
/// 1. Unknown code -> 404, nothing written
/// 2. Expiration set and passed -> 410, nothing written
/// 3. Otherwise the click counter is incremented and committed, a detached
///    task appends the click event, and a 307 redirect is returned
///
/// The click-event write is deliberately not awaited: the redirect goes out
/// as soon as the counter commit lands, and a failed event write is only
/// logged. The counter and the event log are two independent transactions.
///
/// # Note
///
/// Uses 307 Temporary Redirect instead of 301 Permanent Redirect so browsers
/// keep coming back and every visit is counted.
pub async fn redirect_link(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    let now = Utc::now();

    let write_txn = state.db.begin_write()?;
    let record = {
        let mut links = write_txn.open_table(TABLE_LINKS)?;

        // Early returns drop the transaction, which aborts it: 404 and 410
        // leave both the counter and the click log untouched
        let mut record: LinkRecord = match links.get(code.as_str())? {
            Some(guard) => serde_json::from_str(guard.value())?,
            None => return Err(ApiError::NotFound),
        };
        if record.is_expired(now) {
            return Err(ApiError::Gone);
        }

        record.clicks += 1;
        let record_json = serde_json::to_string(&record)?;
        links.insert(code.as_str(), record_json.as_str())?;
        record
    };
    write_txn.commit()?;

    let client = useragent::classify(
        headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok()),
    );
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| useragent::UNKNOWN.to_string());

    let click = ClickRecord {
        short_code: code,
        timestamp: now,
        ip,
        device: client.device,
        browser: client.browser,
    };

    // Fire-and-forget: the redirect must not wait on the event log
    let db = state.db.clone();
    tokio::spawn(async move {
        if let Err(err) = append_click(&db, &click) {
            warn!("failed to record click for {}: {}", click.short_code, err);
        }
    });

    Ok(Redirect::temporary(&record.original_url))
}

/// Appends one click event to the append-only log
fn append_click(db: &Database, click: &ClickRecord) -> Result<(), ApiError> {
    let click_json = serde_json::to_string(click)?;
    let key = click_key(&click.short_code, click.timestamp.timestamp_micros());

    let write_txn = db.begin_write()?;
    {
        let mut clicks = write_txn.open_table(TABLE_CLICKS)?;
        clicks.insert(key.as_str(), click_json.as_str())?;
    }
    write_txn.commit()?;

    Ok(())
}

/// Aggregates click analytics for every link owned by the caller
///
/// Walks the caller's index entries in creation order and, for each link,
/// range-scans its click events to build two groupings: visits per calendar
/// date (server-local time) and visits per device category. Everything is
/// recomputed from scratch on each request; cost is linear in links times
/// events per link.
///
/// # Example Request
///
/// `GET /api/links/dashboard` with `Authorization: Bearer <token>`
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<LinkSummary>>, ApiError> {
    let now = Utc::now();

    let read_txn = state.db.begin_read()?;
    let links = read_txn.open_table(TABLE_LINKS)?;
    let index = read_txn.open_table(TABLE_USER_INDEX)?;
    let click_log = read_txn.open_table(TABLE_CLICKS)?;

    let (start, end) = prefix_range(&claims.user_id);
    let mut summaries = Vec::new();

    for entry in index.range(start.as_str()..end.as_str())? {
        let (_, code_value) = entry?;
        let code = code_value.value().to_string();

        let Some(link_value) = links.get(code.as_str())? else {
            continue;
        };
        let record: LinkRecord = serde_json::from_str(link_value.value())?;

        let mut clicks_over_time: BTreeMap<String, u64> = BTreeMap::new();
        let mut device_breakdown: BTreeMap<String, u64> = BTreeMap::new();

        let (click_start, click_end) = prefix_range(&code);
        for click_entry in click_log.range(click_start.as_str()..click_end.as_str())? {
            let (_, click_value) = click_entry?;
            let click: ClickRecord = serde_json::from_str(click_value.value())?;

            let day = click
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string();
            *clicks_over_time.entry(day).or_insert(0) += 1;
            *device_breakdown.entry(click.device).or_insert(0) += 1;
        }

        let expired = record.is_expired(now);
        let short_url = format!("{}/{}", state.config.public_base(), record.short_code);

        summaries.push(LinkSummary {
            original_url: record.original_url,
            short_url,
            created_at: record.created_at,
            expiration_date: record.expiration_date,
            clicks: record.clicks,
            expired,
            clicks_over_time,
            device_breakdown,
        });
    }

    Ok(Json(summaries))
}
