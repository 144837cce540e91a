use axum::extract::{Extension, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

use crate::auth::{is_public, Caller};
use crate::dtos::user::{marshal_all, LoginRequest, UserRequest, UserView};
use crate::error::AppError;
use crate::extract::{JsonBody, UserIdPath};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub status: String,
}

// POST /users
#[instrument(skip(state, headers, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<UserView>), AppError> {
    let user = state.users.create_user(payload.into_user(0)).await?;
    Ok((StatusCode::CREATED, Json(user.marshal(is_public(&headers)))))
}

// GET /users/{user_id}
#[instrument(skip(state, caller))]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    UserIdPath(user_id): UserIdPath,
) -> Result<Json<UserView>, AppError> {
    let user = state.users.get_user(user_id).await?;

    // callers always see their own record in full
    if caller.caller_id == Some(user.id) {
        return Ok(Json(user.marshal(false)));
    }
    Ok(Json(user.marshal(caller.is_public)))
}

// PUT and PATCH /users/{user_id}
#[instrument(skip(state, headers, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    UserIdPath(user_id): UserIdPath,
    JsonBody(payload): JsonBody<UserRequest>,
) -> Result<Json<UserView>, AppError> {
    let is_partial = method == Method::PATCH;
    let user = state
        .users
        .update_user(payload.into_user(user_id), is_partial)
        .await?;
    Ok(Json(user.marshal(is_public(&headers))))
}

// DELETE /users/{user_id}
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> Result<Json<Value>, AppError> {
    state.users.delete_user(user_id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}

// GET /internal/users/search?status=
#[instrument(skip(state, headers))]
pub async fn search_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<UserView>>, AppError> {
    let users = state.users.search(&query.status).await?;
    Ok(Json(marshal_all(&users, is_public(&headers))))
}

// POST /users/login
#[instrument(skip(state, headers, payload))]
pub async fn login_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<UserView>, AppError> {
    let user = state.users.login_user(payload).await?;
    Ok(Json(user.marshal(is_public(&headers))))
}

// GET/PUT/PATCH/DELETE /users/login
pub async fn login_path_as_user_id() -> AppError {
    AppError::validation("user id must be a number")
}
