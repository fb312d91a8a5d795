//! Restaurant entity and repository trait.
//!
//! Maps to the `restaurants` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A named establishment that publishes menus.
///
/// Maps to the `restaurants` table:
/// - id: BIGINT PRIMARY KEY DEFAULT nextval('global_seq')
/// - name: VARCHAR(100) NOT NULL UNIQUE
///
/// Menus reference restaurants by id; a restaurant does not own its menus'
/// lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Generated primary key, immutable once assigned
    pub id: i64,

    /// Display name (unique)
    pub name: String,
}

/// Repository trait for Restaurant data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Find a restaurant by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError>;

    /// All restaurants, ordered by name.
    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError>;

    /// Create a restaurant. Duplicate names fail with `AppError::Conflict`.
    async fn create(&self, name: &str) -> Result<Restaurant, AppError>;
}
