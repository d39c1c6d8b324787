use axum::{
    extract::State,
    response::Json,
};
use std::sync::Arc;

use crate::database::{self, LeaderboardEntry};
use crate::errors::GameError;
use super::AppState;

/// Serves the last materialized snapshot as stored; nothing is recomputed here.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>, GameError> {
    let mut conn = database::get_connection(&state.pool)?;
    let entries = database::leaderboard::list_all(&mut conn)?;
    Ok(Json(entries))
}
