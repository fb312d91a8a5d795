//! Restaurant Handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::application::dto::request::RestaurantTo;
use crate::application::dto::response::RestaurantResponse;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List restaurants
pub async fn get_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, AppError> {
    let restaurants = state.restaurants.get_all().await?;
    Ok(Json(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

/// Get restaurant by ID
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<RestaurantResponse>, AppError> {
    let restaurant = state.restaurants.get(restaurant_id).await?;
    Ok(Json(RestaurantResponse::from(restaurant)))
}

/// Register a restaurant
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(body): Json<RestaurantTo>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = state.restaurants.create(body).await?;
    let location = format!("/restaurants/{}", restaurant.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(RestaurantResponse::from(restaurant)),
    ))
}
