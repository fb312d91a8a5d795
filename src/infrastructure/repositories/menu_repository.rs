//! Menu Repository Implementation
//!
//! PostgreSQL implementation of the MenuRepository trait.
//! Menus and their dishes are always read and written together.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::map_write_error;
use crate::domain::{Dish, Menu, MenuRepository};
use crate::shared::error::AppError;

/// Database row representation of the menus table.
#[derive(Debug, sqlx::FromRow)]
struct MenuRow {
    id: i64,
    menu_date: NaiveDate,
    restaurant_id: i64,
}

impl MenuRow {
    fn into_menu(self, dishes: Vec<Dish>) -> Menu {
        Menu::new(Some(self.id), self.menu_date)
            .with_restaurant(self.restaurant_id)
            .with_dishes(dishes)
    }
}

/// Database row representation of the dishes table.
#[derive(Debug, sqlx::FromRow)]
struct DishRow {
    id: i64,
    menu_id: i64,
    name: String,
    price: i64,
}

impl DishRow {
    fn into_dish(self) -> Dish {
        Dish {
            id: Some(self.id),
            menu_id: Some(self.menu_id),
            name: self.name,
            price: self.price,
        }
    }
}

/// Load dishes for `rows` on the same connection and assemble menus.
async fn attach_dishes(conn: &mut PgConnection, rows: Vec<MenuRow>) -> Result<Vec<Menu>, AppError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let dish_rows = sqlx::query_as::<_, DishRow>(
        r#"
        SELECT id, menu_id, name, price
        FROM dishes
        WHERE menu_id = ANY($1)
        ORDER BY name ASC, id ASC
        "#,
    )
    .bind(&ids[..])
    .fetch_all(&mut *conn)
    .await?;

    let mut by_menu: HashMap<i64, Vec<Dish>> = HashMap::new();
    for row in dish_rows {
        by_menu.entry(row.menu_id).or_default().push(row.into_dish());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let dishes = by_menu.remove(&row.id).unwrap_or_default();
            row.into_menu(dishes)
        })
        .collect())
}

/// PostgreSQL menu repository implementation.
#[derive(Clone)]
pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    /// Create a new PgMenuRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read-only transaction so a menu and its dishes come from one snapshot.
    async fn snapshot(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_id(&self, id: i64, restaurant_id: i64) -> Result<Option<Menu>, AppError> {
        let mut tx = self.snapshot().await?;
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, menu_date, restaurant_id
            FROM menus
            WHERE id = $1 AND restaurant_id = $2
            "#,
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_all(&mut *tx)
        .await?;

        let menu = attach_dishes(&mut tx, rows).await?.pop();
        tx.commit().await?;
        Ok(menu)
    }

    async fn find_by_restaurant_and_date(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Menu>, AppError> {
        let mut tx = self.snapshot().await?;
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, menu_date, restaurant_id
            FROM menus
            WHERE restaurant_id = $1 AND menu_date = $2
            "#,
        )
        .bind(restaurant_id)
        .bind(date)
        .fetch_all(&mut *tx)
        .await?;

        let menu = attach_dishes(&mut tx, rows).await?.pop();
        tx.commit().await?;
        Ok(menu)
    }

    async fn find_all(&self) -> Result<Vec<Menu>, AppError> {
        let mut tx = self.snapshot().await?;
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, menu_date, restaurant_id
            FROM menus
            ORDER BY menu_date DESC, restaurant_id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let menus = attach_dishes(&mut tx, rows).await?;
        tx.commit().await?;
        Ok(menus)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>, AppError> {
        let mut tx = self.snapshot().await?;
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, menu_date, restaurant_id
            FROM menus
            WHERE menu_date = $1
            ORDER BY restaurant_id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&mut *tx)
        .await?;

        let menus = attach_dishes(&mut tx, rows).await?;
        tx.commit().await?;
        Ok(menus)
    }

    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Menu>, AppError> {
        let mut tx = self.snapshot().await?;
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, menu_date, restaurant_id
            FROM menus
            WHERE restaurant_id = $1
            ORDER BY menu_date DESC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&mut *tx)
        .await?;

        let menus = attach_dishes(&mut tx, rows).await?;
        tx.commit().await?;
        Ok(menus)
    }

    async fn find_dish_by_id(&self, dish_id: i64) -> Result<Option<Dish>, AppError> {
        let row = sqlx::query_as::<_, DishRow>(
            "SELECT id, menu_id, name, price FROM dishes WHERE id = $1",
        )
        .bind(dish_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_dish()))
    }

    /// Insert or replace a menu and its dishes in one transaction.
    async fn save(&self, menu: &Menu) -> Result<Menu, AppError> {
        let restaurant_id = menu
            .restaurant_id
            .ok_or_else(|| AppError::Validation("restaurant: must not be null".into()))?;

        let mut tx = self.pool.begin().await?;

        let row = match menu.id {
            None => sqlx::query_as::<_, MenuRow>(
                r#"
                INSERT INTO menus (menu_date, restaurant_id)
                VALUES ($1, $2)
                RETURNING id, menu_date, restaurant_id
                "#,
            )
            .bind(menu.date)
            .bind(restaurant_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "menu"))?,

            Some(id) => {
                let row = sqlx::query_as::<_, MenuRow>(
                    r#"
                    UPDATE menus
                    SET menu_date = $3
                    WHERE id = $1 AND restaurant_id = $2
                    RETURNING id, menu_date, restaurant_id
                    "#,
                )
                .bind(id)
                .bind(restaurant_id)
                .bind(menu.date)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| map_write_error(e, "menu"))?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Menu with id {} not found for restaurant {}",
                        id, restaurant_id
                    ))
                })?;

                sqlx::query("DELETE FROM dishes WHERE menu_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                row
            }
        };

        let mut dishes = Vec::with_capacity(menu.dishes().len());
        for dish in menu.dishes() {
            let dish_row = sqlx::query_as::<_, DishRow>(
                r#"
                INSERT INTO dishes (menu_id, name, price)
                VALUES ($1, $2, $3)
                RETURNING id, menu_id, name, price
                "#,
            )
            .bind(row.id)
            .bind(&dish.name)
            .bind(dish.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "dish"))?;

            dishes.push(dish_row.into_dish());
        }

        tx.commit().await?;

        Ok(row.into_menu(dishes))
    }

    /// Delete dishes, then the menu, in one transaction.
    async fn delete_by_id(&self, id: i64, restaurant_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM menus WHERE id = $1 AND restaurant_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM dishes WHERE menu_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
