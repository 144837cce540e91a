// src/service/user.rs
use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::{error, info, instrument};

use crate::dtos::user::LoginRequest;
use crate::error::{AppError, AppResult};
use crate::models::user::{User, STATUS_ACTIVE};
use crate::repository::UserRepository;

/// User use cases, as seen by the HTTP handlers.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, user: User) -> AppResult<User>;

    async fn get_user(&self, user_id: i64) -> AppResult<User>;

    /// PUT replaces name and email outright, PATCH (`is_partial`) only copies
    /// the non-empty fields of `user`.
    async fn update_user(&self, user: User, is_partial: bool) -> AppResult<User>;

    async fn delete_user(&self, user_id: i64) -> AppResult<()>;

    async fn search(&self, status: &str) -> AppResult<Vec<User>>;

    async fn login_user(&self, request: LoginRequest) -> AppResult<User>;
}

#[derive(Clone)]
pub struct UsersService<R: UserRepository> {
    repository: Arc<R>,
    hash_cost: u32,
}

impl<R: UserRepository> UsersService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            hash_cost: DEFAULT_COST,
        }
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }
}

async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    let hashed = spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| {
            error!(error = %e, "password hash task failed");
            AppError::internal("password hashing failed")
        })?;
    hashed.map_err(|e| {
        error!(error = %e, "error when trying to hash password");
        AppError::internal("password hashing failed")
    })
}

async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    let verified = spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| {
            error!(error = %e, "password verify task failed");
            AppError::internal("password verification failed")
        })?;
    verified.map_err(|e| {
        error!(error = %e, "error when trying to verify password");
        AppError::internal("password verification failed")
    })
}

#[async_trait]
impl<R: UserRepository> UserService for UsersService<R> {
    #[instrument(skip(self, user))]
    async fn create_user(&self, mut user: User) -> AppResult<User> {
        user.validate()?;

        user.status = user.status.trim().to_string();
        if user.status.is_empty() {
            user.status = STATUS_ACTIVE.to_string();
        }
        user.password = hash_password(std::mem::take(&mut user.password), self.hash_cost).await?;

        self.repository.insert(&mut user).await?;
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i64) -> AppResult<User> {
        self.repository.fetch_by_id(user_id).await
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn update_user(&self, user: User, is_partial: bool) -> AppResult<User> {
        let mut current = self.repository.fetch_by_id(user.id).await?;
        current.merge_from(&user, is_partial);

        self.repository.update_name_email(&current).await?;
        info!(user_id = current.id, is_partial, "user updated");
        Ok(current)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: i64) -> AppResult<()> {
        self.repository.delete_by_id(user_id).await?;
        info!(user_id, "user deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, status: &str) -> AppResult<Vec<User>> {
        self.repository.find_by_status(status).await
    }

    #[instrument(skip(self, request))]
    async fn login_user(&self, request: LoginRequest) -> AppResult<User> {
        let email = request.email.trim().to_lowercase();
        let password = request.password.trim().to_string();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("email and password are required"));
        }

        let mut user = self.repository.find_by_email(&email).await?;
        let stored_hash = std::mem::take(&mut user.password);
        if !verify_password(password, stored_hash).await? {
            return Err(AppError::unauthorized("invalid user credentials"));
        }

        Ok(user)
    }
}
