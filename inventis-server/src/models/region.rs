//! Coverage regions shown on the landing page

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{max_chars, required_text};
use super::{ValidationError, ValidationErrors};

/// Maximum length for region titles (matches the `VARCHAR(100)` column)
pub const MAX_REGION_TITLE_LEN: usize = 100;

/// Persisted coverage region
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub sensors: i32,
    pub created_at: DateTime<Utc>,
}

/// Raw region body.
///
/// `sensors` is kept as a JSON number so fractional values can be reported
/// as a field error instead of a body parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct RegionPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sensors: Option<serde_json::Number>,
}

/// Region ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegion {
    pub title: String,
    pub description: String,
    pub sensors: i32,
}

impl RegionPayload {
    pub fn validate(self) -> Result<NewRegion, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(&mut errors, "title", self.title, 1);
        let title = max_chars(&mut errors, "title", title, MAX_REGION_TITLE_LEN);
        let description = required_text(&mut errors, "description", self.description, 1);
        let sensors = match self.sensors {
            None => {
                errors.push(ValidationError::Empty { field: "sensors" });
                None
            }
            Some(n) => parse_sensors(&n).map_err(|e| errors.push(e)).ok(),
        };

        match (title, description, sensors) {
            (Some(title), Some(description), Some(sensors)) => Ok(NewRegion {
                title,
                description,
                sensors,
            }),
            _ => Err(errors),
        }
    }
}

/// Whole numbers only, but `5.0` and `1e3` count as whole.
fn parse_sensors(n: &serde_json::Number) -> Result<i32, ValidationError> {
    let field = "sensors";
    let out_of_range = || ValidationError::OutOfRange {
        field,
        min: i64::from(i32::MIN),
        max: i64::from(i32::MAX),
    };

    if let Some(v) = n.as_i64() {
        return i32::try_from(v).map_err(|_| out_of_range());
    }
    if n.is_u64() {
        return Err(out_of_range());
    }
    match n.as_f64() {
        Some(v) if v.is_finite() && v.fract() == 0.0 => {
            if v < f64::from(i32::MIN) || v > f64::from(i32::MAX) {
                Err(out_of_range())
            } else {
                Ok(v as i32)
            }
        }
        _ => Err(ValidationError::NotAnInteger { field }),
    }
}
