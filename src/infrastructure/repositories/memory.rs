//! In-Memory Store
//!
//! Implements every repository trait over process memory. Used by the
//! `memory` storage backend and by the integration tests. All writes take
//! the table lock once, so each save or delete is observed whole.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::{
    Dish, Menu, MenuRepository, Restaurant, RestaurantRepository, Vote, VoteCount,
    VoteRepository,
};
use crate::shared::error::AppError;

/// First value handed out by the id sequence, shared by every table.
pub const START_SEQ: i64 = 100_000;

struct Tables {
    next_id: i64,
    restaurants: BTreeMap<i64, Restaurant>,
    menus: BTreeMap<i64, Menu>,
    votes: BTreeMap<i64, Vote>,
}

impl Tables {
    fn new() -> Self {
        Self {
            next_id: START_SEQ,
            restaurants: BTreeMap::new(),
            menus: BTreeMap::new(),
            votes: BTreeMap::new(),
        }
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Shared, cloneable in-memory storage.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::new())),
        }
    }

    /// Number of dishes currently stored across all menus.
    pub fn dish_count(&self) -> usize {
        self.tables
            .read()
            .menus
            .values()
            .map(|m| m.dishes().len())
            .sum()
    }
}

fn for_read(menu: &Menu) -> Menu {
    let mut menu = menu.clone();
    menu.sort_dishes_by_name();
    menu
}

#[async_trait]
impl RestaurantRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        Ok(self.tables.read().restaurants.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError> {
        let mut all: Vec<Restaurant> = self.tables.read().restaurants.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn create(&self, name: &str) -> Result<Restaurant, AppError> {
        let mut tables = self.tables.write();
        if tables.restaurants.values().any(|r| r.name == name) {
            return Err(AppError::Conflict(
                "restaurant violates constraint restaurants_unique_name".into(),
            ));
        }
        let restaurant = Restaurant {
            id: tables.next_id(),
            name: name.to_string(),
        };
        tables.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }
}

#[async_trait]
impl MenuRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64, restaurant_id: i64) -> Result<Option<Menu>, AppError> {
        Ok(self
            .tables
            .read()
            .menus
            .get(&id)
            .filter(|m| m.restaurant_id == Some(restaurant_id))
            .map(for_read))
    }

    async fn find_by_restaurant_and_date(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Menu>, AppError> {
        Ok(self
            .tables
            .read()
            .menus
            .values()
            .find(|m| m.restaurant_id == Some(restaurant_id) && m.date == date)
            .map(for_read))
    }

    async fn find_all(&self) -> Result<Vec<Menu>, AppError> {
        let mut all: Vec<Menu> = self.tables.read().menus.values().map(for_read).collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then(a.restaurant_id.cmp(&b.restaurant_id)));
        Ok(all)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>, AppError> {
        let mut found: Vec<Menu> = self
            .tables
            .read()
            .menus
            .values()
            .filter(|m| m.date == date)
            .map(for_read)
            .collect();
        found.sort_by_key(|m| m.restaurant_id);
        Ok(found)
    }

    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError> {
        let mut found: Vec<Menu> = self
            .tables
            .read()
            .menus
            .values()
            .filter(|m| m.restaurant_id == Some(restaurant_id))
            .map(for_read)
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn find_dish_by_id(&self, dish_id: i64) -> Result<Option<Dish>, AppError> {
        Ok(self
            .tables
            .read()
            .menus
            .values()
            .flat_map(|m| m.dishes().iter())
            .find(|d| d.id == Some(dish_id))
            .cloned())
    }

    async fn save(&self, menu: &Menu) -> Result<Menu, AppError> {
        let restaurant_id = menu
            .restaurant_id
            .ok_or_else(|| AppError::Validation("restaurant: must not be null".into()))?;

        let mut tables = self.tables.write();

        if !tables.restaurants.contains_key(&restaurant_id) {
            return Err(AppError::NotFound("menu references a missing row".into()));
        }

        if let Some(id) = menu.id {
            let owned = tables
                .menus
                .get(&id)
                .is_some_and(|m| m.restaurant_id == Some(restaurant_id));
            if !owned {
                return Err(AppError::NotFound(format!(
                    "Menu with id {} not found for restaurant {}",
                    id, restaurant_id
                )));
            }
        }

        let duplicate = tables.menus.values().any(|m| {
            m.date == menu.date && m.restaurant_id == Some(restaurant_id) && m.id != menu.id
        });
        if duplicate {
            return Err(AppError::Conflict(
                "menu violates constraint unique_menu".into(),
            ));
        }

        let id = match menu.id {
            Some(id) => id,
            None => tables.next_id(),
        };

        let mut dishes = Vec::with_capacity(menu.dishes().len());
        for dish in menu.dishes() {
            dishes.push(Dish {
                id: Some(tables.next_id()),
                menu_id: Some(id),
                name: dish.name.clone(),
                price: dish.price,
            });
        }

        let stored = Menu::new(Some(id), menu.date)
            .with_restaurant(restaurant_id)
            .with_dishes(dishes);
        tables.menus.insert(id, stored.clone());

        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64, restaurant_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write();
        let owned = tables
            .menus
            .get(&id)
            .is_some_and(|m| m.restaurant_id == Some(restaurant_id));
        if owned {
            tables.menus.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn find_by_user_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Vote>, AppError> {
        Ok(self
            .tables
            .read()
            .votes
            .values()
            .find(|v| v.user_id == user_id && v.date == date)
            .cloned())
    }

    async fn create(
        &self,
        user_id: i64,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Vote, AppError> {
        let mut tables = self.tables.write();
        if !tables.restaurants.contains_key(&restaurant_id) {
            return Err(AppError::NotFound("vote references a missing row".into()));
        }
        if tables
            .votes
            .values()
            .any(|v| v.user_id == user_id && v.date == date)
        {
            return Err(AppError::Conflict("vote violates constraint unique_vote".into()));
        }
        let vote = Vote {
            id: tables.next_id(),
            user_id,
            restaurant_id,
            date,
        };
        tables.votes.insert(vote.id, vote.clone());
        Ok(vote)
    }

    async fn change_restaurant(
        &self,
        vote_id: i64,
        restaurant_id: i64,
    ) -> Result<Vote, AppError> {
        let mut tables = self.tables.write();
        if !tables.restaurants.contains_key(&restaurant_id) {
            return Err(AppError::NotFound("vote references a missing row".into()));
        }
        let vote = tables
            .votes
            .get_mut(&vote_id)
            .ok_or_else(|| AppError::NotFound(format!("Vote with id {} not found", vote_id)))?;
        vote.restaurant_id = restaurant_id;
        Ok(vote.clone())
    }

    async fn count_by_date(&self, date: NaiveDate) -> Result<Vec<VoteCount>, AppError> {
        let tables = self.tables.read();
        let mut per_restaurant: BTreeMap<i64, i64> = BTreeMap::new();
        for vote in tables.votes.values().filter(|v| v.date == date) {
            *per_restaurant.entry(vote.restaurant_id).or_default() += 1;
        }

        let mut counts: Vec<VoteCount> = per_restaurant
            .into_iter()
            .filter_map(|(restaurant_id, votes)| {
                tables.restaurants.get(&restaurant_id).map(|r| VoteCount {
                    restaurant_id,
                    restaurant_name: r.name.clone(),
                    votes,
                })
            })
            .collect();
        counts.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then_with(|| a.restaurant_name.cmp(&b.restaurant_name))
        });
        Ok(counts)
    }
}
