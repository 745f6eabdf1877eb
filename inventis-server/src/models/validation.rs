//! Validation error types

use std::fmt;

use serde::Serialize;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent or blank
    Empty { field: &'static str },

    /// Field is shorter than its minimum length
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field is not a syntactically valid email address
    InvalidEmail { field: &'static str },

    /// Privacy-policy consent was not given
    ConsentRequired,

    /// Numeric field is not a whole number
    NotAnInteger { field: &'static str },

    /// Integer field is outside its storable range
    OutOfRange { field: &'static str, min: i64, max: i64 },
}

impl ValidationError {
    /// JSON path of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidEmail { field }
            | Self::NotAnInteger { field }
            | Self::OutOfRange { field, .. } => field,
            Self::ConsentRequired => "consent",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters.", capitalize(field), min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidEmail { .. } => f.write_str("Please enter a valid email address."),
            Self::ConsentRequired => f.write_str("You must agree to the privacy policy."),
            Self::NotAnInteger { field } => write!(f, "{} must be an integer", field),
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Field detail as rendered in a 400 response body
#[derive(Debug, Serialize)]
pub struct FieldIssue {
    pub path: &'static str,
    pub message: String,
}

/// Every validation failure found in one payload.
///
/// Payload validation keeps going after the first bad field so the client
/// can show all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// True if any failure concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    pub fn issues(&self) -> Vec<FieldIssue> {
        self.0
            .iter()
            .map(|e| FieldIssue {
                path: e.field(),
                message: e.to_string(),
            })
            .collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", e)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Require a string field with at least `min` characters.
///
/// Records a failure and returns `None` when the field is missing, blank or
/// short. Fields with a minimum above one report the length rule even when
/// absent; plain required fields report that they are required.
pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    min: usize,
) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() && s.chars().count() >= min => Some(s),
        _ => {
            if min > 1 {
                errors.push(ValidationError::TooShort { field, min });
            } else {
                errors.push(ValidationError::Empty { field });
            }
            None
        }
    }
}

/// Apply an upper bound to a value that already passed [`required_text`].
pub(crate) fn max_chars(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Option<String> {
    match value {
        Some(s) if s.chars().count() > max => {
            errors.push(ValidationError::TooLong { field, max });
            None
        }
        other => other,
    }
}
