//! Vote Service
//!
//! Once-per-day lunch voting. A user's first vote of the day is recorded;
//! repeating the vote switches restaurants until the daily deadline, after
//! which the vote is final.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::domain::{MenuRepository, RestaurantRepository, Vote, VoteCount, VoteRepository};
use crate::infrastructure::metrics;
use crate::shared::clock::Clock;
use crate::shared::error::AppError;

/// Vote service trait
#[async_trait]
pub trait VoteService: Send + Sync {
    /// Vote for a restaurant for today
    async fn vote(&self, user_id: i64, restaurant_id: i64) -> Result<VoteOutcome, VoteError>;

    /// The user's vote for a day (today if `None`)
    async fn get_own(&self, user_id: i64, date: Option<NaiveDate>) -> Result<Vote, VoteError>;

    /// Vote counts for a day (today if `None`), most votes first
    async fn results(&self, date: Option<NaiveDate>) -> Result<Vec<VoteCount>, VoteError>;
}

/// Result of casting a vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// First vote of the day
    Created(Vote),
    /// Existing vote now points at the requested restaurant
    Changed(Vote),
}

impl VoteOutcome {
    pub fn vote(&self) -> &Vote {
        match self {
            VoteOutcome::Created(v) | VoteOutcome::Changed(v) => v,
        }
    }

    pub fn into_vote(self) -> Vote {
        match self {
            VoteOutcome::Created(v) | VoteOutcome::Changed(v) => v,
        }
    }
}

/// Vote service errors
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Vote for {date} can no longer be changed after {deadline}")]
    Closed { date: NaiveDate, deadline: NaiveTime },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<VoteError> for AppError {
    fn from(e: VoteError) -> Self {
        match e {
            VoteError::NotFound(msg) => AppError::NotFound(msg),
            VoteError::Validation(msg) => AppError::Validation(msg),
            VoteError::Conflict(msg) => AppError::Conflict(msg),
            e @ VoteError::Closed { .. } => AppError::VoteClosed(e.to_string()),
            VoteError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

fn internal(e: AppError) -> VoteError {
    VoteError::Internal(e.to_string())
}

/// VoteService implementation
pub struct VoteServiceImpl<V, M, R>
where
    V: VoteRepository,
    M: MenuRepository,
    R: RestaurantRepository,
{
    vote_repo: Arc<V>,
    menu_repo: Arc<M>,
    restaurant_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    deadline: NaiveTime,
}

impl<V, M, R> VoteServiceImpl<V, M, R>
where
    V: VoteRepository,
    M: MenuRepository,
    R: RestaurantRepository,
{
    pub fn new(
        vote_repo: Arc<V>,
        menu_repo: Arc<M>,
        restaurant_repo: Arc<R>,
        clock: Arc<dyn Clock>,
        deadline: NaiveTime,
    ) -> Self {
        Self {
            vote_repo,
            menu_repo,
            restaurant_repo,
            clock,
            deadline,
        }
    }

    async fn cast(&self, user_id: i64, restaurant_id: i64) -> Result<VoteOutcome, VoteError> {
        let now = self.clock.now();
        let today = now.date();

        self.restaurant_repo
            .find_by_id(restaurant_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| VoteError::NotFound(format!("Restaurant id={} not found", restaurant_id)))?;

        if self
            .menu_repo
            .find_by_restaurant_and_date(restaurant_id, today)
            .await
            .map_err(internal)?
            .is_none()
        {
            return Err(VoteError::Validation(format!(
                "Restaurant id={} has no menu for {}",
                restaurant_id, today
            )));
        }

        let existing = self
            .vote_repo
            .find_by_user_and_date(user_id, today)
            .await
            .map_err(internal)?;

        match existing {
            None => {
                let vote = self
                    .vote_repo
                    .create(user_id, restaurant_id, today)
                    .await
                    .map_err(|e| match e {
                        AppError::Conflict(_) => VoteError::Conflict(format!(
                            "User id={} already voted for {}",
                            user_id, today
                        )),
                        e => internal(e),
                    })?;
                tracing::info!(user_id, restaurant_id, %today, "Vote recorded");
                Ok(VoteOutcome::Created(vote))
            }
            Some(_) if now.time() >= self.deadline => Err(VoteError::Closed {
                date: today,
                deadline: self.deadline,
            }),
            Some(vote) if vote.restaurant_id == restaurant_id => Ok(VoteOutcome::Changed(vote)),
            Some(vote) => {
                let from = vote.restaurant_id;
                let vote = self
                    .vote_repo
                    .change_restaurant(vote.id, restaurant_id)
                    .await
                    .map_err(internal)?;
                tracing::info!(user_id, from, to = restaurant_id, %today, "Vote changed");
                Ok(VoteOutcome::Changed(vote))
            }
        }
    }
}

#[async_trait]
impl<V, M, R> VoteService for VoteServiceImpl<V, M, R>
where
    V: VoteRepository + 'static,
    M: MenuRepository + 'static,
    R: RestaurantRepository + 'static,
{
    async fn vote(&self, user_id: i64, restaurant_id: i64) -> Result<VoteOutcome, VoteError> {
        let result = self.cast(user_id, restaurant_id).await;
        let outcome = match &result {
            Ok(VoteOutcome::Created(_)) => "created",
            Ok(VoteOutcome::Changed(_)) => "changed",
            Err(VoteError::Closed { .. }) => "closed",
            Err(VoteError::Conflict(_)) => "conflict",
            Err(VoteError::NotFound(_)) | Err(VoteError::Validation(_)) => "rejected",
            Err(VoteError::Internal(_)) => "error",
        };
        metrics::record_vote(outcome);
        result
    }

    async fn get_own(&self, user_id: i64, date: Option<NaiveDate>) -> Result<Vote, VoteError> {
        let date = date.unwrap_or_else(|| self.clock.now().date());
        self.vote_repo
            .find_by_user_and_date(user_id, date)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                VoteError::NotFound(format!("User id={} has no vote for {}", user_id, date))
            })
    }

    async fn results(&self, date: Option<NaiveDate>) -> Result<Vec<VoteCount>, VoteError> {
        let date = date.unwrap_or_else(|| self.clock.now().date());
        let mut counts = self.vote_repo.count_by_date(date).await.map_err(internal)?;
        counts.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then_with(|| a.restaurant_name.cmp(&b.restaurant_name))
        });
        Ok(counts)
    }
}
