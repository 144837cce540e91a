use std::fmt;

use sqlx::FromRow;

use crate::error::AppError;

pub const STATUS_ACTIVE: &str = "active";

/// Row of the `users` table.
///
/// `password` holds the bcrypt hash once the user has been persisted. Reads that
/// do not select the column leave it empty.
#[derive(Clone, Default, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_created: String,
    pub status: String,
    #[sqlx(default)]
    pub password: String,
}

impl User {
    /// Normalizes the user for creation and rejects it when email or password
    /// end up empty.
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.password = self.password.trim().to_string();

        if self.email.is_empty() {
            return Err(AppError::validation("invalid email address"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("invalid password"));
        }
        Ok(())
    }

    /// Copies name and email from `incoming`. A partial merge skips empty fields.
    pub fn merge_from(&mut self, incoming: &User, is_partial: bool) {
        if !is_partial {
            self.first_name = incoming.first_name.clone();
            self.last_name = incoming.last_name.clone();
            self.email = incoming.email.clone();
            return;
        }

        if !incoming.first_name.is_empty() {
            self.first_name = incoming.first_name.clone();
        }
        if !incoming.last_name.is_empty() {
            self.last_name = incoming.last_name.clone();
        }
        if !incoming.email.is_empty() {
            self.email = incoming.email.clone();
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("date_created", &self.date_created)
            .field("status", &self.status)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> User {
        User {
            id: 7,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "j@x.com".into(),
            date_created: "2024-01-31 12:00:00".into(),
            status: STATUS_ACTIVE.into(),
            password: "hash".into(),
        }
    }

    #[test]
    fn validate_trims_and_lowercases() {
        let mut user = User {
            first_name: "  Jane ".into(),
            last_name: " Doe".into(),
            email: " J@X.com ".into(),
            password: " secret ".into(),
            ..Default::default()
        };
        user.validate().unwrap();

        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "j@x.com");
        assert_eq!(user.password, "secret");
    }

    #[test]
    fn validate_rejects_blank_email() {
        let mut user = User {
            email: "   ".into(),
            password: "secret".into(),
            ..Default::default()
        };
        let err = user.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "invalid email address"));
    }

    #[test]
    fn validate_rejects_blank_password() {
        let mut user = User {
            email: "a@b.com".into(),
            password: "\t ".into(),
            ..Default::default()
        };
        let err = user.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "invalid password"));
    }

    #[test]
    fn partial_merge_of_empty_fields_is_a_noop() {
        let mut current = stored();
        current.merge_from(&User::default(), true);
        assert_eq!(current, stored());
    }

    #[test]
    fn partial_merge_copies_only_non_empty_fields() {
        let mut current = stored();
        let incoming = User {
            last_name: "Smith".into(),
            ..Default::default()
        };
        current.merge_from(&incoming, true);

        assert_eq!(current.first_name, "Jane");
        assert_eq!(current.last_name, "Smith");
        assert_eq!(current.email, "j@x.com");
    }

    #[test]
    fn full_merge_overwrites_with_empty_values() {
        let mut current = stored();
        let incoming = User {
            first_name: String::new(),
            last_name: "Roe".into(),
            email: "r@x.com".into(),
            ..Default::default()
        };
        current.merge_from(&incoming, false);

        assert_eq!(current.first_name, "");
        assert_eq!(current.last_name, "Roe");
        assert_eq!(current.email, "r@x.com");
        assert_eq!(current.id, 7);
        assert_eq!(current.date_created, "2024-01-31 12:00:00");
        assert_eq!(current.status, STATUS_ACTIVE);
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", stored());
        assert!(!rendered.contains("hash"));
        assert!(rendered.contains("<redacted>"));
    }
}
