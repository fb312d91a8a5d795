//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Dish;

/// Menu transfer object, used for both create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuTo {
    /// Must be absent on create; on update, if present, must match the path id
    pub id: Option<i64>,

    #[validate(required(message = "must not be null"))]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(nested)]
    pub dishes: Vec<DishTo>,
}

impl MenuTo {
    pub fn new(id: Option<i64>, date: Option<NaiveDate>, dishes: Vec<DishTo>) -> Self {
        Self { id, date, dishes }
    }

    /// Dishes as unsaved values; ids in the request are not reused.
    pub fn to_dishes(&self) -> Vec<Dish> {
        self.dishes
            .iter()
            .map(|d| Dish::new(d.name.clone(), d.price))
            .collect()
    }
}

/// Dish entry inside a menu body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishTo {
    /// Ignored on write
    #[serde(default)]
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
}

impl DishTo {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
        }
    }
}

impl From<&Dish> for DishTo {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name.clone(),
            price: dish.price,
        }
    }
}

/// Create restaurant request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestaurantTo {
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub name: String,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// `?date=YYYY-MM-DD`, defaulting to today
#[derive(Debug, Deserialize)]
pub struct OptionalDateQuery {
    pub date: Option<NaiveDate>,
}

/// `?restaurant_id=ID`
#[derive(Debug, Deserialize)]
pub struct RestaurantQuery {
    pub restaurant_id: i64,
}
