pub mod models;
pub mod store;

pub use models::{Favorite, Monument, NewFavorite, NewMonument, User};
pub use store::{CatalogStore, PgStore, StoreError};

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Build the Postgres pool from DATABASE_URL.
pub async fn connect(max_connections: u32) -> Result<PgPool, StoreError> {
    let url = std::env::var("DATABASE_URL").map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&url)
        .await?;

    Ok(pool)
}
