//! # Domain Entities
//!
//! Core domain entities of the lunch voting service.
//! All entities map directly to their corresponding database tables.
//!
//! ## Entities
//!
//! - **Restaurant**: An establishment that publishes daily menus
//! - **Menu**: A restaurant's offer for one day; owns its dishes
//! - **Dish**: A named, priced item on exactly one menu
//! - **Vote**: A user's restaurant choice for one day
//!
//! ## Repository Traits
//!
//! Each aggregate has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod dish;
mod menu;
mod restaurant;
mod vote;

pub use dish::Dish;
pub use menu::{Menu, MenuRepository};
pub use restaurant::{Restaurant, RestaurantRepository};
pub use vote::{Vote, VoteCount, VoteRepository};

#[cfg(test)]
pub use menu::MockMenuRepository;
#[cfg(test)]
pub use restaurant::MockRestaurantRepository;
#[cfg(test)]
pub use vote::MockVoteRepository;
