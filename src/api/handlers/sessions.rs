use axum::{
    extract::State,
    response::Json,
};
use std::sync::Arc;

use crate::database::{self, Session};
use crate::errors::GameError;
use super::AppState;

pub async fn get_recent_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Session>>, GameError> {
    let limit = state.config.queries.recent_sessions_limit;
    let mut conn = database::get_connection(&state.pool)?;
    let sessions = database::sessions::list_recent(&mut conn, limit)?;
    Ok(Json(sessions))
}
