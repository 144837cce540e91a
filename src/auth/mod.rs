// src/auth/mod.rs
pub mod jwt;

use axum::extract::Query;
use axum::http::request::Parts;
use serde::Deserialize;

use crate::error::AppError;

pub const HEADER_X_PUBLIC: &str = "X-Public";

/// Who is calling, as resolved from the request's access token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller {
    /// `None` for anonymous requests.
    pub caller_id: Option<i64>,
    pub is_public: bool,
}

/// Resolves a request to a [`Caller`]. An invalid or expired token is an error,
/// a missing token is an anonymous caller.
pub trait Authorizer: Send + Sync {
    fn authenticate(&self, parts: &Parts) -> Result<Caller, AppError>;
}

/// `X-Public: true` marks the request as a public one.
pub fn is_public(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(HEADER_X_PUBLIC)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Validates HS256 access tokens issued by the OAuth service.
#[derive(Clone)]
pub struct JwtAuthorizer {
    secret: String,
}

impl JwtAuthorizer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

fn access_token(parts: &Parts) -> Option<String> {
    let from_query = Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.access_token)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if from_query.is_some() {
        return from_query;
    }

    parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl Authorizer for JwtAuthorizer {
    fn authenticate(&self, parts: &Parts) -> Result<Caller, AppError> {
        let is_public = is_public(&parts.headers);

        let Some(token) = access_token(parts) else {
            return Ok(Caller { caller_id: None, is_public });
        };

        let claims = jwt::verify_token(&token, &self.secret)?;
        Ok(Caller {
            caller_id: Some(claims.sub),
            is_public,
        })
    }
}
