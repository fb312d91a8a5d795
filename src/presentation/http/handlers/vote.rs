//! Vote Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::OptionalDateQuery;
use crate::application::dto::response::{VoteResponse, VoteResultResponse};
use crate::application::services::VoteOutcome;
use crate::presentation::http::extractors::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Vote for a restaurant today, or change today's vote
pub async fn vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(restaurant_id): Path<i64>,
) -> Result<(StatusCode, Json<VoteResponse>), AppError> {
    let outcome = state.votes.vote(auth.user_id, restaurant_id).await?;

    let status = match outcome {
        VoteOutcome::Created(_) => StatusCode::CREATED,
        VoteOutcome::Changed(_) => StatusCode::OK,
    };

    Ok((status, Json(VoteResponse::from(outcome.into_vote()))))
}

/// The caller's vote for a day
pub async fn get_own(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<OptionalDateQuery>,
) -> Result<Json<VoteResponse>, AppError> {
    let vote = state.votes.get_own(auth.user_id, query.date).await?;
    Ok(Json(VoteResponse::from(vote)))
}

/// Per-restaurant vote counts for a day
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<OptionalDateQuery>,
) -> Result<Json<Vec<VoteResultResponse>>, AppError> {
    let counts = state.votes.results(query.date).await?;
    Ok(Json(
        counts.into_iter().map(VoteResultResponse::from).collect(),
    ))
}
