use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use core::SimulationError;
use log::error;
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::InternalError(message) => {
                error!("internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<SimulationError> for ApiError {
    fn from(error: SimulationError) -> Self {
        let message = error.to_string();

        match error {
            SimulationError::MatchNotFound(_) | SimulationError::ClubNotFound(_) => {
                ApiError::NotFound(message)
            }
            SimulationError::NotScheduled { .. } => ApiError::Conflict(message),
            SimulationError::RosterIncomplete(_) | SimulationError::InvalidFormation { .. } => {
                ApiError::BadRequest(message)
            }
            SimulationError::Aborted { .. } | SimulationError::Store(_) => {
                ApiError::InternalError(message)
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(error: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("background task failed: {}", error))
    }
}
