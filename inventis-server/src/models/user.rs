//! Site users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::required_text;
use super::ValidationErrors;

/// Persisted user. The password column is opaque and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated registration data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl UserPayload {
    pub fn validate(self) -> Result<NewUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let username = required_text(&mut errors, "username", self.username, 1);
        let password = required_text(&mut errors, "password", self.password, 1);

        match (username, password) {
            (Some(username), Some(password)) => Ok(NewUser { username, password }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: 1,
            username: "ops".into(),
            password: "hunter2".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "ops");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn requires_both_fields() {
        let errors = UserPayload {
            username: Some("  ".into()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert!(errors.has_field("username"));
        assert!(errors.has_field("password"));
    }
}
