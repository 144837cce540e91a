use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::Caller;
use crate::state::AppState;

/// Resolves the caller through the configured authorizer and attaches it to the
/// request as an extension. Rejects invalid or expired tokens with 401.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();

    let caller: Caller = match state.authorizer.authenticate(&parts) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "rejected access token");
            return e.into_response();
        }
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    next.run(req).await
}
