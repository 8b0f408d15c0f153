//! Database initialization and table definitions
//!
//! This module handles the setup of the embedded redb database: the main
//! link table, the per-user secondary index, and the append-only click-event
//! log, plus the composite-key helpers shared by the handlers.

use redb::{Database, TableDefinition};
use std::sync::Arc;

use crate::config::Config;

/// Main table for link records
///
/// Key: short code as string
/// Value: JSON-serialized LinkRecord
///
/// Example:
/// - Key: "abc123"
/// - Value: '{"short_code":"abc123","original_url":"https://example.com",...}'
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// Secondary index for listing a user's links chronologically
///
/// Key: composite key in format "{user_id}:{created_at_micros}:{code}"
/// Value: the short code, used to fetch the live record from TABLE_LINKS
///
/// The timestamp keeps entries in creation order; the trailing code keeps
/// keys unique even for links created in the same microsecond.
pub const TABLE_USER_INDEX: TableDefinition<&str, &str> = TableDefinition::new("user_index_v1");

/// Append-only click-event log
///
/// Key: composite key in format "{code}:{timestamp_micros}"
/// Value: JSON-serialized ClickRecord
///
/// Events for one link are contiguous, so the dashboard reads them with a
/// single range scan per link.
pub const TABLE_CLICKS: TableDefinition<&str, &str> = TableDefinition::new("clicks_v1");

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,

    /// Configuration resolved once at startup
    pub config: Arc<Config>,
}

/// Builds the index key for one of a user's links
pub fn user_index_key(user_id: &str, created_at_micros: i64, code: &str) -> String {
    format!("{}:{}:{}", user_id, created_at_micros, code)
}

/// Builds the log key for a click event
pub fn click_key(code: &str, timestamp_micros: i64) -> String {
    format!("{}:{}", code, timestamp_micros)
}

/// Range bounds covering every composite key with the given prefix
///
/// Keys are "{prefix}:{micros}..." and short codes never contain ':' (link
/// creation rejects such aliases), so no other code's keys can sort inside
/// the range; '{' (which sorts after ':') closes it.
pub fn prefix_range(prefix: &str) -> (String, String) {
    (format!("{}:", prefix), format!("{}:{{", prefix))
}

/// Initializes the embedded database and creates the required tables
///
/// Opens (or creates) the database file at the given path, opens all three
/// tables inside one write transaction, and commits so the table structures
/// are persisted even before the first request.
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_LINKS)?;
        write_txn.open_table(TABLE_USER_INDEX)?;
        write_txn.open_table(TABLE_CLICKS)?;
    }
    write_txn.commit()?;

    Ok(db)
}
