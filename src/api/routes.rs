use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{
    games::submit_game, health::liveness, leaderboard::get_leaderboard, players::get_players,
    sessions::get_recent_sessions, AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/players", get(get_players))
        .route("/api/sessions", get(get_recent_sessions))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/game", post(submit_game))
        .with_state(state)
}
