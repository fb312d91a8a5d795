//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    DateQuery, DishTo, MenuTo, OptionalDateQuery, RestaurantQuery, RestaurantTo,
};
pub use response::{
    DishDetailResponse, DishResponse, MenuResponse, RestaurantResponse, VoteResponse,
    VoteResultResponse,
};
