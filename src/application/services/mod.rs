//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **MenuService**: Menu CRUD scoped by restaurant, date/restaurant queries
//! - **RestaurantService**: Restaurant lookup and registration
//! - **VoteService**: Daily voting and results

pub mod menu_service;
pub mod restaurant_service;
pub mod vote_service;

pub use menu_service::{MenuError, MenuService, MenuServiceImpl};
pub use restaurant_service::{RestaurantError, RestaurantService, RestaurantServiceImpl};
pub use vote_service::{VoteError, VoteOutcome, VoteService, VoteServiceImpl};
