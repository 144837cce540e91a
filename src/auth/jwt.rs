use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use tracing::{debug, error};
use crate::error::AppError;

/// Access token claims; `sub` is the caller's user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub iat: usize,
}

/// Issues an access token for `user_id`.
///
/// Tokens are minted by the OAuth service in production; this exists for tests
/// and local tooling that need a token the service will accept.
pub fn sign_token(user_id: i64, ttl: Duration, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + ttl;
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| {
            error!(error = %e, "error when trying to sign access token");
            AppError::internal("token signing failed")
        })
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256)
    )
    .map(|d| d.claims)
    .map_err(|e| {
        debug!(error = %e, "access token rejected");
        AppError::unauthorized("invalid or expired access token")
    })
}
