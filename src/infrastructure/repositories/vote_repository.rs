//! Vote Repository Implementation
//!
//! PostgreSQL implementation of the VoteRepository trait.
//! One vote per user per day is enforced by the `unique_vote` constraint.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::map_write_error;
use crate::domain::{Vote, VoteCount, VoteRepository};
use crate::shared::error::AppError;

/// Database row representation of the votes table.
#[derive(Debug, sqlx::FromRow)]
struct VoteRow {
    id: i64,
    user_id: i64,
    restaurant_id: i64,
    vote_date: NaiveDate,
}

impl VoteRow {
    fn into_vote(self) -> Vote {
        Vote {
            id: self.id,
            user_id: self.user_id,
            restaurant_id: self.restaurant_id,
            date: self.vote_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VoteCountRow {
    restaurant_id: i64,
    restaurant_name: String,
    votes: i64,
}

/// PostgreSQL vote repository implementation.
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    async fn find_by_user_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Vote>, AppError> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT id, user_id, restaurant_id, vote_date
            FROM votes
            WHERE user_id = $1 AND vote_date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_vote()))
    }

    async fn create(
        &self,
        user_id: i64,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Vote, AppError> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (user_id, restaurant_id, vote_date)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, restaurant_id, vote_date
            "#,
        )
        .bind(user_id)
        .bind(restaurant_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "vote"))?;

        Ok(row.into_vote())
    }

    async fn change_restaurant(
        &self,
        vote_id: i64,
        restaurant_id: i64,
    ) -> Result<Vote, AppError> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            UPDATE votes
            SET restaurant_id = $2
            WHERE id = $1
            RETURNING id, user_id, restaurant_id, vote_date
            "#,
        )
        .bind(vote_id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "vote"))?;

        row.map(|r| r.into_vote())
            .ok_or_else(|| AppError::NotFound(format!("Vote with id {} not found", vote_id)))
    }

    async fn count_by_date(&self, date: NaiveDate) -> Result<Vec<VoteCount>, AppError> {
        let rows = sqlx::query_as::<_, VoteCountRow>(
            r#"
            SELECT r.id AS restaurant_id, r.name AS restaurant_name, COUNT(v.id) AS votes
            FROM votes v
            JOIN restaurants r ON r.id = v.restaurant_id
            WHERE v.vote_date = $1
            GROUP BY r.id, r.name
            ORDER BY votes DESC, r.name ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| VoteCount {
                restaurant_id: r.restaurant_id,
                restaurant_name: r.restaurant_name,
                votes: r.votes,
            })
            .collect())
    }
}
