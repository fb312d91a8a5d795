//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Dish, Menu, Restaurant, Vote, VoteCount};

/// Dish response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishResponse {
    pub id: Option<i64>,
    pub name: String,
    pub price: i64,
}

impl From<&Dish> for DishResponse {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name.clone(),
            price: dish.price,
        }
    }
}

/// Single dish lookup response, including its owning menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishDetailResponse {
    pub id: Option<i64>,
    pub menu_id: Option<i64>,
    pub name: String,
    pub price: i64,
}

impl From<Dish> for DishDetailResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            menu_id: dish.menu_id,
            name: dish.name,
            price: dish.price,
        }
    }
}

/// Menu response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResponse {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub restaurant_id: Option<i64>,
    pub dishes: Vec<DishResponse>,
}

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            date: menu.date,
            restaurant_id: menu.restaurant_id,
            dishes: menu.dishes().iter().map(DishResponse::from).collect(),
        }
    }
}

/// Restaurant response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantResponse {
    pub id: i64,
    pub name: String,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
        }
    }
}

/// Vote response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub id: i64,
    pub restaurant_id: i64,
    pub date: NaiveDate,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            restaurant_id: vote.restaurant_id,
            date: vote.date,
        }
    }
}

/// One row of the daily results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResultResponse {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub votes: i64,
}

impl From<VoteCount> for VoteResultResponse {
    fn from(count: VoteCount) -> Self {
        Self {
            restaurant_id: count.restaurant_id,
            restaurant_name: count.restaurant_name,
            votes: count.votes,
        }
    }
}
