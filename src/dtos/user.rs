// src/dtos/user.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::user::User;

/// JSON `null` binds like an absent field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of POST/PUT/PATCH /users. Missing or null fields bind as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

impl UserRequest {
    /// Builds the entity for `id`. Server-owned fields stay empty.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_created: String::new(),
            status: self.status,
            password: self.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub date_created: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_created: String,
    pub status: String,
}

/// Output projection of a [`User`]; serializes as the inner object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserView {
    Public(PublicUser),
    Private(PrivateUser),
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            date_created: user.date_created.clone(),
            status: user.status.clone(),
        }
    }
}

impl From<&User> for PrivateUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            date_created: user.date_created.clone(),
            status: user.status.clone(),
        }
    }
}

impl User {
    pub fn marshal(&self, is_public: bool) -> UserView {
        if is_public {
            UserView::Public(PublicUser::from(self))
        } else {
            UserView::Private(PrivateUser::from(self))
        }
    }
}

pub fn marshal_all(users: &[User], is_public: bool) -> Vec<UserView> {
    users.iter().map(|u| u.marshal(is_public)).collect()
}
