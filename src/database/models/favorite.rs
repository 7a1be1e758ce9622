use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Join entity recording that a user has marked a monument as a favorite.
/// The (user_id, monument_id) pair is unique; rows are created and deleted,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: i32,
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(rename = "monumentId")]
    pub monument_id: i32,
    pub created: DateTime<Utc>,
}

/// A validated (user, monument) pair ready for insertion.
#[derive(Debug, Clone, Copy)]
pub struct NewFavorite {
    pub user_id: i32,
    pub monument_id: i32,
}

impl NewFavorite {
    /// Both references are required positive row ids.
    pub fn new(user_id: i32, monument_id: i32) -> Result<Self, ValidationError> {
        if user_id <= 0 {
            return Err(ValidationError::new("userId", "userId must be a valid id."));
        }
        if monument_id <= 0 {
            return Err(ValidationError::new(
                "monumentId",
                "monumentId must be a valid id.",
            ));
        }
        Ok(Self {
            user_id,
            monument_id,
        })
    }
}
