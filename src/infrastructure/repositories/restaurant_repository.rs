//! Restaurant Repository Implementation
//!
//! PostgreSQL implementation of the RestaurantRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use super::map_write_error;
use crate::domain::{Restaurant, RestaurantRepository};
use crate::shared::error::AppError;

/// Database row representation of the restaurants table.
#[derive(Debug, sqlx::FromRow)]
struct RestaurantRow {
    id: i64,
    name: String,
}

impl RestaurantRow {
    fn into_restaurant(self) -> Restaurant {
        Restaurant {
            id: self.id,
            name: self.name,
        }
    }
}

/// PostgreSQL restaurant repository implementation.
#[derive(Clone)]
pub struct PgRestaurantRepository {
    pool: PgPool,
}

impl PgRestaurantRepository {
    /// Create a new PgRestaurantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantRepository for PgRestaurantRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        let row = sqlx::query_as::<_, RestaurantRow>(
            "SELECT id, name FROM restaurants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_restaurant()))
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError> {
        let rows = sqlx::query_as::<_, RestaurantRow>(
            "SELECT id, name FROM restaurants ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_restaurant()).collect())
    }

    async fn create(&self, name: &str) -> Result<Restaurant, AppError> {
        let row = sqlx::query_as::<_, RestaurantRow>(
            r#"
            INSERT INTO restaurants (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "restaurant"))?;

        Ok(row.into_restaurant())
    }
}
