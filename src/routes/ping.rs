use axum::{routing::get, Router};
use crate::handlers::ping::ping;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}
