//! Session tokens and the authentication middleware
//!
//! Login issues an HS256-signed token carrying the caller's identity; the
//! middleware verifies the `Authorization: Bearer` header on protected
//! routes and attaches the decoded claims to the request for handlers.
//!
//! Verification is stateless: the server keeps no session records, and the
//! tokens carry no expiration claim.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::database::AppState;
use crate::error::ApiError;

/// Identity asserted by a session token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    /// Email the caller logged in with
    pub email: String,

    /// Owner identifier used to scope links
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl Claims {
    /// Signs these claims into a bearer token
    pub fn sign(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Decodes and verifies a bearer token
    pub fn verify(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        // Tokens carry no exp claim, so drop the default expiry checks
        let mut validation = Validation::default();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }
}

/// Middleware guarding the authenticated API routes
///
/// Reads the `Authorization: Bearer <token>` header and verifies the token
/// against the configured secret. A missing header yields 401; a present but
/// invalid token yields 403. On success the decoded [`Claims`] are inserted
/// into the request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    // Only the "Bearer <token>" shape is accepted; a bare token is rejected
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Forbidden)?;

    let claims =
        Claims::verify(token, &state.config.jwt_secret).map_err(|_| ApiError::Forbidden)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips_identity() {
        let claims = Claims {
            email: "user@example.com".to_string(),
            user_id: "user_1".to_string(),
        };
        let token = claims.sign("secret").unwrap();
        let decoded = Claims::verify(&token, "secret").unwrap();
        assert_eq!(decoded.email, "user@example.com");
        assert_eq!(decoded.user_id, "user_1");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let claims = Claims {
            email: "user@example.com".to_string(),
            user_id: "user_1".to_string(),
        };
        let token = claims.sign("secret").unwrap();
        assert!(Claims::verify(&token, "other-secret").is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(Claims::verify("not.a.token", "secret").is_err());
    }
}
