//! Contact form submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::required_text;
use super::{EmailAddress, ValidationError, ValidationErrors};

/// Persisted contact submission
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Raw contact form body, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub consent: Option<bool>,
    pub user_id: Option<i64>,
}

/// Validated contact submission, ready to insert.
///
/// Consent is implied: a payload without it never becomes a `NewContactSubmission`.
#[derive(Debug, Clone)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
    pub user_id: Option<i64>,
}

impl ContactSubmissionPayload {
    /// Check the payload against the contact form rules.
    ///
    /// # Rules
    /// - name at least 2 characters
    /// - email syntactically valid
    /// - subject at least 5 characters
    /// - message at least 10 characters
    /// - consent must be `true`
    pub fn validate(self) -> Result<NewContactSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", self.name, 2);
        let email = match self.email.as_deref() {
            Some(raw) => EmailAddress::parse("email", raw)
                .map_err(|e| errors.push(e))
                .ok(),
            None => {
                errors.push(ValidationError::InvalidEmail { field: "email" });
                None
            }
        };
        let subject = required_text(&mut errors, "subject", self.subject, 5);
        let message = required_text(&mut errors, "message", self.message, 10);

        if self.consent != Some(true) {
            errors.push(ValidationError::ConsentRequired);
        }

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) if errors.is_empty() => {
                Ok(NewContactSubmission {
                    name,
                    email,
                    subject,
                    message,
                    user_id: self.user_id,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmissionPayload {
        ContactSubmissionPayload {
            name: Some("Asha".into()),
            email: Some("asha@example.in".into()),
            subject: Some("Sensor pilot".into()),
            message: Some("We would like to host a sensor at our school.".into()),
            consent: Some(true),
            user_id: None,
        }
    }

    #[test]
    fn accepts_valid_payload() {
        let new = valid().validate().expect("valid payload");
        assert_eq!(new.name, "Asha");
        assert_eq!(new.email.as_str(), "asha@example.in");
        assert_eq!(new.user_id, None);
    }

    #[test]
    fn accepts_minimum_lengths() {
        let payload = ContactSubmissionPayload {
            name: Some("Al".into()),
            subject: Some("Hello".into()),
            message: Some("0123456789".into()),
            ..valid()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rejects_consent_false() {
        let payload = ContactSubmissionPayload {
            consent: Some(false),
            ..valid()
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.has_field("consent"));
        assert!(errors.to_string().contains("privacy policy"));
    }

    #[test]
    fn rejects_consent_missing() {
        let payload = ContactSubmissionPayload {
            consent: None,
            ..valid()
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.iter().count(), 1);
        assert!(errors.has_field("consent"));
    }

    #[test]
    fn reports_each_short_field() {
        let payload = ContactSubmissionPayload {
            name: Some("A".into()),
            email: Some("nope".into()),
            subject: Some("Hey".into()),
            message: Some("short".into()),
            consent: Some(true),
            user_id: None,
        };
        let errors = payload.validate().unwrap_err();
        for field in ["name", "email", "subject", "message"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
        assert!(!errors.has_field("consent"));
    }

    #[test]
    fn missing_name_reports_length_rule() {
        let payload = ContactSubmissionPayload {
            name: None,
            ..valid()
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.to_string(), "Name must be at least 2 characters.");
    }

    #[test]
    fn empty_payload_fails_everything() {
        let errors = ContactSubmissionPayload::default().validate().unwrap_err();
        assert_eq!(errors.iter().count(), 5);
    }

    #[test]
    fn deserializes_camel_case() {
        let payload: ContactSubmissionPayload = serde_json::from_str(
            r#"{"name":"Ravi","email":"r@x.io","subject":"Hello","message":"0123456789","consent":true,"userId":7}"#,
        )
        .unwrap();
        assert_eq!(payload.user_id, Some(7));
        assert_eq!(payload.validate().unwrap().user_id, Some(7));
    }
}
