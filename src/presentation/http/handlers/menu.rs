//! Menu Handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::application::dto::request::{DateQuery, MenuTo, RestaurantQuery};
use crate::application::dto::response::{DishDetailResponse, MenuResponse};
use crate::domain::Menu;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn to_responses(menus: Vec<Menu>) -> Json<Vec<MenuResponse>> {
    Json(menus.into_iter().map(MenuResponse::from).collect())
}

/// List every menu
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<MenuResponse>>, AppError> {
    let menus = state.menus.get_all().await?;
    Ok(to_responses(menus))
}

/// Get one menu of a restaurant
pub async fn get_menu(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(i64, i64)>,
) -> Result<Json<MenuResponse>, AppError> {
    let menu = state.menus.get(menu_id, restaurant_id).await?;
    Ok(Json(MenuResponse::from(menu)))
}

/// Create a menu for a restaurant
pub async fn create_menu(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
    Json(body): Json<MenuTo>,
) -> Result<impl IntoResponse, AppError> {
    let menu = state.menus.create(body, restaurant_id).await?;

    let location = menu
        .id
        .map(|id| format!("/menus/{}/{}", restaurant_id, id))
        .ok_or_else(|| AppError::Internal("Stored menu has no id".into()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MenuResponse::from(menu)),
    ))
}

/// Replace a menu's date and dishes
pub async fn update_menu(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(i64, i64)>,
    Json(body): Json<MenuTo>,
) -> Result<StatusCode, AppError> {
    state.menus.update(body, menu_id, restaurant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a menu and its dishes
pub async fn delete_menu(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state.menus.delete(menu_id, restaurant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Menus served on a date
pub async fn get_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<MenuResponse>>, AppError> {
    let menus = state.menus.find_by_date(query.date).await?;
    Ok(to_responses(menus))
}

/// Menus published by a restaurant
pub async fn get_by_restaurant(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> Result<Json<Vec<MenuResponse>>, AppError> {
    let menus = state.menus.find_by_restaurant(query.restaurant_id).await?;
    Ok(to_responses(menus))
}

/// Get a single dish
pub async fn get_dish(
    State(state): State<AppState>,
    Path(dish_id): Path<i64>,
) -> Result<Json<DishDetailResponse>, AppError> {
    let dish = state.menus.get_dish(dish_id).await?;
    Ok(Json(DishDetailResponse::from(dish)))
}
