use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use super::models::{Favorite, Monument, NewFavorite, NewMonument, User};

/// Errors from the data access layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Data access seam for the catalog. Handlers receive an implementation
/// through `AppState` rather than reaching for a process-wide pool.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_monument(&self, id: i32) -> Result<Option<Monument>, StoreError>;

    async fn insert_monument(&self, monument: NewMonument) -> Result<Monument, StoreError>;

    async fn find_favorite(
        &self,
        user_id: i32,
        monument_id: i32,
    ) -> Result<Option<Favorite>, StoreError>;

    async fn insert_favorite(&self, favorite: NewFavorite) -> Result<Favorite, StoreError>;

    async fn delete_favorite(&self, id: i32) -> Result<(), StoreError>;

    /// Monuments the user has favorited, via an explicit join. Only monument
    /// columns are selected, so no join-table attributes leak into the output.
    /// Order is implementation-defined.
    async fn list_favorite_monuments(&self, user_id: i32) -> Result<Vec<Monument>, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// sqlx/Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_monument(&self, id: i32) -> Result<Option<Monument>, StoreError> {
        let monument = sqlx::query_as::<_, Monument>(
            "SELECT id, title, description, location, created FROM monuments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(monument)
    }

    async fn insert_monument(&self, monument: NewMonument) -> Result<Monument, StoreError> {
        let created = sqlx::query_as::<_, Monument>(
            "INSERT INTO monuments (title, description, location) \
             VALUES ($1, $2, $3) \
             RETURNING id, title, description, location, created",
        )
        .bind(&monument.title)
        .bind(&monument.description)
        .bind(&monument.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_favorite(
        &self,
        user_id: i32,
        monument_id: i32,
    ) -> Result<Option<Favorite>, StoreError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, monument_id, created FROM favorites \
             WHERE user_id = $1 AND monument_id = $2",
        )
        .bind(user_id)
        .bind(monument_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favorite)
    }

    async fn insert_favorite(&self, favorite: NewFavorite) -> Result<Favorite, StoreError> {
        // The unique index on (user_id, monument_id) is what actually guards
        // against a concurrent duplicate; a race here surfaces as a
        // constraint violation from this insert.
        let created = sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, monument_id) \
             VALUES ($1, $2) \
             RETURNING id, user_id, monument_id, created",
        )
        .bind(favorite.user_id)
        .bind(favorite.monument_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_favorite(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_favorite_monuments(&self, user_id: i32) -> Result<Vec<Monument>, StoreError> {
        let monuments = sqlx::query_as::<_, Monument>(
            "SELECT m.id, m.title, m.description, m.location, m.created \
             FROM monuments m \
             JOIN favorites f ON f.monument_id = m.id \
             WHERE f.user_id = $1 \
             ORDER BY f.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(monuments)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
