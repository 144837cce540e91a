// src/state.rs
use std::sync::Arc;

use crate::auth::Authorizer;
use crate::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(users: impl UserService + 'static, authorizer: impl Authorizer + 'static) -> Self {
        Self {
            users: Arc::new(users),
            authorizer: Arc::new(authorizer),
        }
    }
}
