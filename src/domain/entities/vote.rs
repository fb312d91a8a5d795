//! Vote entity and repository trait.
//!
//! Maps to the `votes` table in the database schema.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A user's lunch choice for one day.
///
/// Maps to the `votes` table:
/// - id: BIGINT PRIMARY KEY DEFAULT nextval('global_seq')
/// - user_id: BIGINT NOT NULL
/// - restaurant_id: BIGINT NOT NULL REFERENCES restaurants(id)
/// - vote_date: DATE NOT NULL
/// - UNIQUE (user_id, vote_date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub date: NaiveDate,
}

/// Number of votes one restaurant received on a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub votes: i64,
}

/// Repository trait for Vote data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find the vote a user cast on a day.
    async fn find_by_user_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Vote>, AppError>;

    /// Record a first vote. A second vote for the same `(user, date)` fails
    /// with `AppError::Conflict`.
    async fn create(
        &self,
        user_id: i64,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Vote, AppError>;

    /// Point an existing vote at another restaurant.
    async fn change_restaurant(&self, vote_id: i64, restaurant_id: i64)
        -> Result<Vote, AppError>;

    /// Per-restaurant vote counts for a day. Restaurants without votes are omitted.
    async fn count_by_date(&self, date: NaiveDate) -> Result<Vec<VoteCount>, AppError>;
}
