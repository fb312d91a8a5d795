//! Repository Implementations
//!
//! Implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgRestaurantRepository** - Restaurant lookup and registration
//! - **PgMenuRepository** - Menus with their dishes, written atomically
//! - **PgVoteRepository** - Daily votes and per-restaurant counts
//! - **InMemoryStore** - All three traits over process memory
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{
//!     PgMenuRepository, PgRestaurantRepository, PgVoteRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let restaurant_repo = PgRestaurantRepository::new(pool.clone());
//!     let menu_repo = PgMenuRepository::new(pool.clone());
//!     let vote_repo = PgVoteRepository::new(pool);
//! }
//! ```

pub mod memory;
pub mod menu_repository;
pub mod restaurant_repository;
pub mod vote_repository;

pub use memory::InMemoryStore;
pub use menu_repository::PgMenuRepository;
pub use restaurant_repository::PgRestaurantRepository;
pub use vote_repository::PgVoteRepository;

use crate::shared::error::AppError;

/// Translate a failed write into the domain error the services expect.
///
/// Unique violations become `Conflict`, dangling references become `NotFound`.
pub(crate) fn map_write_error(err: sqlx::Error, entity: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!(
                "{} violates constraint {}",
                entity,
                db_err.constraint().unwrap_or("unique")
            ),
        ),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::NotFound(format!("{} references a missing row", entity))
        }
        _ => AppError::Database(err),
    }
}
