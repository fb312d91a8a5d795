//! Restaurant Service
//!
//! Lookup and registration of restaurants.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::application::dto::RestaurantTo;
use crate::domain::{Restaurant, RestaurantRepository};
use crate::shared::error::AppError;
use crate::shared::validation::validation_message;

/// Restaurant service trait
#[async_trait]
pub trait RestaurantService: Send + Sync {
    /// Get restaurant by ID
    async fn get(&self, id: i64) -> Result<Restaurant, RestaurantError>;

    /// All restaurants ordered by name
    async fn get_all(&self) -> Result<Vec<Restaurant>, RestaurantError>;

    /// Register a new restaurant
    async fn create(&self, restaurant_to: RestaurantTo) -> Result<Restaurant, RestaurantError>;
}

/// Restaurant service errors
#[derive(Debug, thiserror::Error)]
pub enum RestaurantError {
    #[error("Restaurant id={0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Restaurant named {0:?} already exists")]
    DuplicateName(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RestaurantError> for AppError {
    fn from(e: RestaurantError) -> Self {
        match e {
            e @ RestaurantError::NotFound(_) => AppError::NotFound(e.to_string()),
            RestaurantError::Validation(msg) => AppError::Validation(msg),
            e @ RestaurantError::DuplicateName(_) => AppError::Conflict(e.to_string()),
            RestaurantError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// RestaurantService implementation
pub struct RestaurantServiceImpl<R>
where
    R: RestaurantRepository,
{
    restaurant_repo: Arc<R>,
}

impl<R> RestaurantServiceImpl<R>
where
    R: RestaurantRepository,
{
    pub fn new(restaurant_repo: Arc<R>) -> Self {
        Self { restaurant_repo }
    }
}

#[async_trait]
impl<R> RestaurantService for RestaurantServiceImpl<R>
where
    R: RestaurantRepository + 'static,
{
    async fn get(&self, id: i64) -> Result<Restaurant, RestaurantError> {
        self.restaurant_repo
            .find_by_id(id)
            .await
            .map_err(|e| RestaurantError::Internal(e.to_string()))?
            .ok_or(RestaurantError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        self.restaurant_repo
            .find_all()
            .await
            .map_err(|e| RestaurantError::Internal(e.to_string()))
    }

    async fn create(&self, restaurant_to: RestaurantTo) -> Result<Restaurant, RestaurantError> {
        restaurant_to
            .validate()
            .map_err(|e| RestaurantError::Validation(validation_message(&e)))?;

        let name = restaurant_to.name.trim();
        let created = self
            .restaurant_repo
            .create(name)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => RestaurantError::DuplicateName(name.to_string()),
                e => RestaurantError::Internal(e.to_string()),
            })?;

        tracing::info!(restaurant_id = created.id, name = %created.name, "Restaurant created");
        Ok(created)
    }
}
