use axum::{
    extract::State,
    response::Json,
};
use std::sync::Arc;

use crate::database::{self, Player};
use crate::errors::GameError;
use super::AppState;

pub async fn get_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Player>>, GameError> {
    let mut conn = database::get_connection(&state.pool)?;
    let players = database::players::list_all(&mut conn)?;
    Ok(Json(players))
}
