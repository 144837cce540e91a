// src/repository/mod.rs
pub mod mysql;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::user::{User, STATUS_ACTIVE};
use crate::utils::date;

pub use mysql::MySqlUserRepository;

/// Data access for the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stamps `date_created`, inserts the row and stores the generated id on `user`.
    async fn insert(&self, user: &mut User) -> AppResult<i64>;

    /// Fetch a user by id. Zero rows is `NotFound`.
    async fn fetch_by_id(&self, id: i64) -> AppResult<User>;

    /// Overwrite first name, last name and email of the row matching `user.id`.
    async fn update_name_email(&self, user: &User) -> AppResult<()>;

    /// Hard delete. Deleting a missing id succeeds.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Every user with exactly this status. An empty result is `NotFound`.
    async fn find_by_status(&self, status: &str) -> AppResult<Vec<User>>;

    /// Active user with this email, password hash included.
    async fn find_by_email(&self, email: &str) -> AppResult<User>;
}

pub(crate) fn user_not_found(id: i64) -> AppError {
    AppError::not_found(format!("user {id} not found"))
}

pub(crate) fn no_users_with_status(status: &str) -> AppError {
    AppError::not_found(format!("no users matching status {status}"))
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &mut User) -> AppResult<i64> {
        let mut users = self.users.write().await;

        // mirrors the unique key on users.email
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("email already registered"));
        }

        user.date_created = date::now_db_format();
        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user.id)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<User> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or_else(|| user_not_found(id))
    }

    async fn update_name_email(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.id != user.id && u.email == user.email) {
            return Err(AppError::conflict("email already registered"));
        }

        let stored = users.get_mut(&user.id).ok_or_else(|| user_not_found(user.id))?;
        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.email = user.email.clone();

        tracing::info!(user_id = user.id, "Updated user");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(())
    }

    async fn find_by_status(&self, status: &str) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let found: Vec<User> = users
            .values()
            .filter(|u| u.status == status)
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(no_users_with_status(status));
        }
        Ok(found)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email && u.status == STATUS_ACTIVE)
            .cloned()
            .ok_or_else(|| AppError::not_found("invalid user credentials"))
    }
}
