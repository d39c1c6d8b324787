use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Submission rejected before anything was written.
    #[error("{0}")]
    Validation(String),

    #[error("Store unavailable: {0:#}")]
    StoreUnavailable(#[from] anyhow::Error),

    /// Only ever logged; the triggering submission has already committed.
    #[error("Leaderboard materialization failed: {0:#}")]
    Materialization(#[source] anyhow::Error),
}

impl GameError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::Validation(_) => StatusCode::BAD_REQUEST,
            GameError::StoreUnavailable(_) | GameError::Materialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {:#}", self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
