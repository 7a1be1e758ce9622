use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// A catalog entry. Only a creation timestamp is tracked; monuments are
/// never updated in place by this API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Monument {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub created: DateTime<Utc>,
}

/// Raw monument fields as submitted by the client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonumentPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// A validated monument ready for insertion.
#[derive(Debug, Clone)]
pub struct NewMonument {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
}

impl NewMonument {
    /// Validate the submitted payload before construction. Replaces what the
    /// storage schema would otherwise reject with an opaque constraint error.
    pub fn validate(payload: MonumentPayload) -> Result<Self, ValidationError> {
        let title = require_text("title", payload.title)?;
        let description = require_text("description", payload.description)?;

        Ok(Self {
            title,
            description,
            location: payload.location.filter(|l| !l.trim().is_empty()),
        })
    }
}

fn require_text(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::new(
            field,
            format!("The {} field is required.", field),
        )),
    }
}
