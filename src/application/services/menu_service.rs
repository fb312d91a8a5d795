//! Menu Service
//!
//! Application operations on the menu aggregate. Uniqueness of
//! `(date, restaurant)` is enforced by the repository; this service only
//! translates the repository's rejection into a domain error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use validator::Validate;

use crate::application::dto::MenuTo;
use crate::domain::{Dish, Menu, MenuRepository, RestaurantRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_message;

/// Menu service trait
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Get a menu scoped to its restaurant
    async fn get(&self, id: i64, restaurant_id: i64) -> Result<Menu, MenuError>;

    /// All menus, newest date first, then by restaurant
    async fn get_all(&self) -> Result<Vec<Menu>, MenuError>;

    /// Create a menu for a restaurant
    async fn create(&self, menu_to: MenuTo, restaurant_id: i64) -> Result<Menu, MenuError>;

    /// Replace the date and dishes of an existing menu
    async fn update(&self, menu_to: MenuTo, id: i64, restaurant_id: i64) -> Result<(), MenuError>;

    /// Delete a menu together with its dishes
    async fn delete(&self, id: i64, restaurant_id: i64) -> Result<(), MenuError>;

    /// Menus served on a date, across restaurants
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>, MenuError>;

    /// Menus of one restaurant, any date
    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, MenuError>;

    /// A single dish
    async fn get_dish(&self, dish_id: i64) -> Result<Dish, MenuError>;
}

/// Menu service errors
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MenuError {
    fn outcome(&self) -> &'static str {
        match self {
            MenuError::NotFound(_) => "not_found",
            MenuError::Validation(_) => "validation",
            MenuError::Conflict(_) => "conflict",
            MenuError::Internal(_) => "error",
        }
    }
}

impl From<AppError> for MenuError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound(msg) => MenuError::NotFound(msg),
            AppError::Validation(msg) => MenuError::Validation(msg),
            AppError::Conflict(msg) => MenuError::Conflict(msg),
            e => MenuError::Internal(e.to_string()),
        }
    }
}

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(msg) => AppError::NotFound(msg),
            MenuError::Validation(msg) => AppError::Validation(msg),
            MenuError::Conflict(msg) => AppError::Conflict(msg),
            MenuError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

fn track<T>(operation: &'static str, result: Result<T, MenuError>) -> Result<T, MenuError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_menu_operation(operation, outcome);
    result
}

fn for_display(mut menu: Menu) -> Menu {
    menu.sort_dishes_by_name();
    menu
}

fn all_for_display(menus: Vec<Menu>) -> Vec<Menu> {
    let mut menus: Vec<Menu> = menus.into_iter().map(for_display).collect();
    menus.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
            .then_with(|| a.id.cmp(&b.id))
    });
    menus
}

fn not_found(id: i64, restaurant_id: i64) -> MenuError {
    MenuError::NotFound(format!(
        "Menu id={} not found for restaurant id={}",
        id, restaurant_id
    ))
}

fn duplicate(restaurant_id: i64, date: NaiveDate) -> MenuError {
    MenuError::Conflict(format!(
        "Restaurant id={} already has a menu for {}",
        restaurant_id, date
    ))
}

/// Validate eagerly and return the required date.
fn validated_date(menu_to: &MenuTo) -> Result<NaiveDate, MenuError> {
    menu_to
        .validate()
        .map_err(|e| MenuError::Validation(validation_message(&e)))?;
    menu_to
        .date
        .ok_or_else(|| MenuError::Validation("date: must not be null".into()))
}

/// MenuService implementation
pub struct MenuServiceImpl<M, R>
where
    M: MenuRepository,
    R: RestaurantRepository,
{
    menu_repo: Arc<M>,
    restaurant_repo: Arc<R>,
}

impl<M, R> MenuServiceImpl<M, R>
where
    M: MenuRepository,
    R: RestaurantRepository,
{
    pub fn new(menu_repo: Arc<M>, restaurant_repo: Arc<R>) -> Self {
        Self {
            menu_repo,
            restaurant_repo,
        }
    }

    async fn create_menu(&self, menu_to: MenuTo, restaurant_id: i64) -> Result<Menu, MenuError> {
        let date = validated_date(&menu_to)?;
        if menu_to.id.is_some() {
            return Err(MenuError::Validation("id: must be null for a new menu".into()));
        }

        self.restaurant_repo
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| {
                MenuError::NotFound(format!("Restaurant id={} not found", restaurant_id))
            })?;

        let menu = Menu::new(None, date)
            .with_restaurant(restaurant_id)
            .with_dishes(menu_to.to_dishes());

        let saved = self.menu_repo.save(&menu).await.map_err(|e| match e {
            AppError::Conflict(_) => duplicate(restaurant_id, date),
            e => e.into(),
        })?;

        tracing::info!(
            menu_id = ?saved.id,
            restaurant_id,
            %date,
            dishes = saved.dishes().len(),
            "Menu created"
        );

        Ok(for_display(saved))
    }

    async fn update_menu(
        &self,
        menu_to: MenuTo,
        id: i64,
        restaurant_id: i64,
    ) -> Result<(), MenuError> {
        let date = validated_date(&menu_to)?;
        if let Some(body_id) = menu_to.id {
            if body_id != id {
                return Err(MenuError::Validation(format!(
                    "id: must be {} to match the request path, got {}",
                    id, body_id
                )));
            }
        }

        let menu = Menu::new(Some(id), date)
            .with_restaurant(restaurant_id)
            .with_dishes(menu_to.to_dishes());

        self.menu_repo.save(&menu).await.map_err(|e| match e {
            AppError::Conflict(_) => duplicate(restaurant_id, date),
            AppError::NotFound(_) => not_found(id, restaurant_id),
            e => e.into(),
        })?;

        tracing::info!(menu_id = id, restaurant_id, %date, "Menu updated");
        Ok(())
    }

    async fn delete_menu(&self, id: i64, restaurant_id: i64) -> Result<(), MenuError> {
        if !self.menu_repo.delete_by_id(id, restaurant_id).await? {
            return Err(not_found(id, restaurant_id));
        }

        tracing::info!(menu_id = id, restaurant_id, "Menu deleted");
        Ok(())
    }
}

#[async_trait]
impl<M, R> MenuService for MenuServiceImpl<M, R>
where
    M: MenuRepository + 'static,
    R: RestaurantRepository + 'static,
{
    async fn get(&self, id: i64, restaurant_id: i64) -> Result<Menu, MenuError> {
        self.menu_repo
            .find_by_id(id, restaurant_id)
            .await?
            .map(for_display)
            .ok_or_else(|| not_found(id, restaurant_id))
    }

    async fn get_all(&self) -> Result<Vec<Menu>, MenuError> {
        Ok(all_for_display(self.menu_repo.find_all().await?))
    }

    async fn create(&self, menu_to: MenuTo, restaurant_id: i64) -> Result<Menu, MenuError> {
        track("create", self.create_menu(menu_to, restaurant_id).await)
    }

    async fn update(&self, menu_to: MenuTo, id: i64, restaurant_id: i64) -> Result<(), MenuError> {
        track("update", self.update_menu(menu_to, id, restaurant_id).await)
    }

    async fn delete(&self, id: i64, restaurant_id: i64) -> Result<(), MenuError> {
        track("delete", self.delete_menu(id, restaurant_id).await)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>, MenuError> {
        Ok(all_for_display(self.menu_repo.find_by_date(date).await?))
    }

    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, MenuError> {
        Ok(all_for_display(
            self.menu_repo.find_by_restaurant(restaurant_id).await?,
        ))
    }

    async fn get_dish(&self, dish_id: i64) -> Result<Dish, MenuError> {
        self.menu_repo
            .find_dish_by_id(dish_id)
            .await?
            .ok_or_else(|| MenuError::NotFound(format!("Dish id={} not found", dish_id)))
    }
}
