// src/repository/mysql.rs
use async_trait::async_trait;
use sqlx::{Error as SqlxError, MySqlPool};
use tracing::{error, instrument};

use super::{no_users_with_status, user_not_found, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::user::{User, STATUS_ACTIVE};
use crate::utils::date;

const QUERY_INSERT_USER: &str =
    "INSERT INTO users (first_name, last_name, email, date_created, status, password) VALUES (?, ?, ?, ?, ?, ?)";
const QUERY_GET_USER: &str =
    "SELECT id, first_name, last_name, email, date_created, status FROM users WHERE id = ?";
const QUERY_UPDATE_USER: &str =
    "UPDATE users SET first_name = ?, last_name = ?, email = ? WHERE id = ?";
const QUERY_DELETE_USER: &str = "DELETE FROM users WHERE id = ?";
const QUERY_FIND_BY_STATUS: &str =
    "SELECT id, first_name, last_name, email, date_created, status FROM users WHERE status = ? ORDER BY id";
const QUERY_FIND_BY_EMAIL: &str =
    "SELECT id, first_name, last_name, email, date_created, status, password FROM users WHERE email = ? AND status = ?";

/// Logs the driver error and folds it into an `AppError`. Unique key violations
/// become `Conflict`, everything else a generic 500.
fn map_db_error(err: SqlxError, context: &str) -> AppError {
    error!(error = %err, "error when trying to {context}");
    match err {
        SqlxError::Database(db_err) if db_err.is_unique_violation() => {
            AppError::conflict("email already registered")
        }
        other => AppError::db(other),
    }
}

#[derive(Clone)]
pub struct MySqlUserRepository {
    db_pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(db_pool: MySqlPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: &mut User) -> AppResult<i64> {
        user.date_created = date::now_db_format();

        let result = sqlx::query(QUERY_INSERT_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.date_created)
            .bind(&user.status)
            .bind(&user.password)
            .execute(&self.db_pool)
            .await
            .map_err(|e| map_db_error(e, "create user"))?;

        user.id = i64::try_from(result.last_insert_id()).map_err(|_| {
            error!(last_insert_id = result.last_insert_id(), "user id out of range");
            AppError::internal("database error")
        })?;
        Ok(user.id)
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(QUERY_GET_USER)
            .bind(id)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| match e {
                SqlxError::RowNotFound => user_not_found(id),
                other => map_db_error(other, "get user"),
            })
    }

    #[instrument(skip(self, user), fields(id = user.id))]
    async fn update_name_email(&self, user: &User) -> AppResult<()> {
        sqlx::query(QUERY_UPDATE_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| map_db_error(e, "update user"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query(QUERY_DELETE_USER)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| map_db_error(e, "delete user"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_status(&self, status: &str) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(QUERY_FIND_BY_STATUS)
            .bind(status)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| map_db_error(e, "find users by status"))?;

        if users.is_empty() {
            return Err(no_users_with_status(status));
        }
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(QUERY_FIND_BY_EMAIL)
            .bind(email)
            .bind(STATUS_ACTIVE)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| map_db_error(e, "find user by email"))?
            .ok_or_else(|| AppError::not_found("invalid user credentials"))
    }
}
