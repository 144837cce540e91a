use axum::{Router, routing::{post, get}, middleware};
use crate::state::AppState;
use crate::handlers::user::{
    create_user, get_user, update_user, delete_user, search_users, login_user,
    login_path_as_user_id,
};
use crate::middleware::auth::authenticate;

pub fn routes(state: AppState) -> Router<AppState> {
    // only the single-user read consults the access token
    let get_authenticated = get(get_user)
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/users", post(create_user))
        // "login" shadows {user_id} for every method; non-POST gets the id error
        .route("/users/login", post(login_user).fallback(login_path_as_user_id))
        .route(
            "/users/{user_id}",
            get_authenticated.put(update_user).patch(update_user).delete(delete_user),
        )
        .route("/internal/users/search", get(search_users))
}
