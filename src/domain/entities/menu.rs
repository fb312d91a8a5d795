//! Menu aggregate and repository trait.
//!
//! Maps to the `menus` table, with dishes loaded from `dishes`.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Dish;
use crate::shared::error::AppError;

/// A restaurant's menu for one calendar day.
///
/// Maps to the `menus` table:
/// - id: BIGINT PRIMARY KEY DEFAULT nextval('global_seq')
/// - menu_date: DATE NOT NULL
/// - restaurant_id: BIGINT NOT NULL REFERENCES restaurants(id)
/// - UNIQUE (menu_date, restaurant_id)
///
/// The menu exclusively owns its dishes. A loaded menu always carries every
/// dish it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Generated primary key (`None` until stored)
    pub id: Option<i64>,

    /// Day the menu is served
    pub date: NaiveDate,

    /// Owning restaurant. Always set on stored menus; only
    /// [`Menu::clone_metadata_only`] produces a menu without one.
    pub restaurant_id: Option<i64>,

    dishes: Vec<Dish>,
}

impl Menu {
    pub fn new(id: Option<i64>, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            restaurant_id: None,
            dishes: Vec::new(),
        }
    }

    pub fn with_restaurant(mut self, restaurant_id: i64) -> Self {
        self.restaurant_id = Some(restaurant_id);
        self
    }

    pub fn with_dishes(mut self, dishes: impl IntoIterator<Item = Dish>) -> Self {
        self.replace_dishes(dishes);
        self
    }

    /// Copy id and date only. Restaurant and dishes are NOT copied.
    pub fn clone_metadata_only(&self) -> Self {
        Self::new(self.id, self.date)
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Add dishes after the existing ones.
    pub fn append_dishes(&mut self, dishes: impl IntoIterator<Item = Dish>) {
        self.dishes.extend(dishes);
    }

    /// Drop the existing dishes and use `dishes` instead.
    pub fn replace_dishes(&mut self, dishes: impl IntoIterator<Item = Dish>) {
        self.dishes = dishes.into_iter().collect();
    }

    /// Display order: dish name ascending, ties by id.
    pub fn sort_dishes_by_name(&mut self) {
        self.dishes
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    }
}

/// Repository trait for Menu data access operations.
///
/// Implementations enforce the `(date, restaurant)` uniqueness themselves and
/// report violations as `AppError::Conflict`; callers must not pre-check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Find a menu by id, scoped to its restaurant.
    async fn find_by_id(&self, id: i64, restaurant_id: i64) -> Result<Option<Menu>, AppError>;

    /// Find the menu a restaurant serves on a given day.
    async fn find_by_restaurant_and_date(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Menu>, AppError>;

    /// All menus, newest date first, then by restaurant id.
    async fn find_all(&self) -> Result<Vec<Menu>, AppError>;

    /// All menus served on `date`, ordered by restaurant id.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>, AppError>;

    /// All menus of one restaurant, newest date first.
    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError>;

    /// Find a single dish by id.
    async fn find_dish_by_id(&self, dish_id: i64) -> Result<Option<Dish>, AppError>;

    /// Insert a new menu with its dishes, or replace the date and dish set of
    /// an existing one, atomically.
    ///
    /// Fails with `Conflict` on a duplicate `(date, restaurant)`, `NotFound`
    /// if an existing id is not under `restaurant_id`, and `Validation` if no
    /// restaurant is attached.
    async fn save(&self, menu: &Menu) -> Result<Menu, AppError>;

    /// Delete a menu and all of its dishes atomically.
    ///
    /// Returns `false` if no such menu exists under `restaurant_id`.
    async fn delete_by_id(&self, id: i64, restaurant_id: i64) -> Result<bool, AppError>;
}
