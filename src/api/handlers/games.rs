use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use std::sync::Arc;

use crate::api::models::{GameRequest, SubmitResponse};
use crate::database;
use crate::domain::GameSubmission;
use crate::errors::GameError;
use super::AppState;

pub async fn submit_game(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GameRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, GameError> {
    let Json(request) = payload.map_err(|rejection| {
        log::warn!("Rejected game submission body: {}", rejection.body_text());
        GameError::validation(rejection.body_text())
    })?;
    let submission = GameSubmission::try_from(request)?;

    let mut conn = database::get_connection(&state.pool)?;
    let recorded = state.recorder.record(&mut conn, &submission)?;

    if !recorded.leaderboard.is_refreshed() {
        log::warn!(
            "Game for {} recorded but leaderboard is stale until the next successful rebuild",
            recorded.player.name
        );
    }

    Ok(Json(SubmitResponse { success: true }))
}
