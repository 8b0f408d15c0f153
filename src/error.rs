//! API error taxonomy
//!
//! Every handler returns `Result<_, ApiError>`; the error converts itself
//! into an HTTP response with a JSON `{"message": ...}` body. Storage and
//! serialization failures surface as 500 with the underlying message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Login attempted with anything but the configured credential pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Protected route called without an Authorization header
    #[error("Authentication required")]
    Unauthenticated,

    /// Bearer token present but undecodable or signed with the wrong secret
    #[error("Invalid or expired token")]
    Forbidden,

    /// Unknown short code
    #[error("Link not found")]
    NotFound,

    /// Link exists but its expiration timestamp has passed
    #[error("Link has expired")]
    Gone,

    /// Custom alias containing the character reserved by the key scheme
    #[error("Alias may not contain ':'")]
    InvalidAlias,

    /// Short code (custom alias or generated) already in use
    #[error("Alias already taken. Please choose another.")]
    AliasTaken,

    #[error("Storage error: {0}")]
    Store(#[from] redb::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

// redb surfaces each transaction phase as its own error type; funnel them
// all into the generic storage variant.
impl From<redb::TransactionError> for ApiError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Store(err.into())
    }
}

impl From<redb::TableError> for ApiError {
    fn from(err: redb::TableError) -> Self {
        Self::Store(err.into())
    }
}

impl From<redb::StorageError> for ApiError {
    fn from(err: redb::StorageError) -> Self {
        Self::Store(err.into())
    }
}

impl From<redb::CommitError> for ApiError {
    fn from(err: redb::CommitError) -> Self {
        Self::Store(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Gone => StatusCode::GONE,
            ApiError::InvalidAlias => StatusCode::BAD_REQUEST,
            ApiError::AliasTaken => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Serde(_) | ApiError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Gone.status(), StatusCode::GONE);
        assert_eq!(ApiError::InvalidAlias.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AliasTaken.status(), StatusCode::CONFLICT);
    }
}
