//! Newsletter subscriptions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{EmailAddress, ValidationError, ValidationErrors};

/// Persisted subscription. One row per email, toggled via `active`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: i64,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw subscribe/unsubscribe body
#[derive(Debug, Default, Deserialize)]
pub struct NewsletterPayload {
    pub email: Option<String>,
}

/// Validated subscription request
#[derive(Debug, Clone)]
pub struct NewNewsletterSubscription {
    pub email: EmailAddress,
}

impl NewsletterPayload {
    pub fn validate(self) -> Result<NewNewsletterSubscription, ValidationErrors> {
        let raw = self
            .email
            .ok_or(ValidationError::Empty { field: "email" })?;
        let email = EmailAddress::parse("email", &raw)?;
        Ok(NewNewsletterSubscription { email })
    }
}
