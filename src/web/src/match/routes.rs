use crate::GameAppData;
use axum::routing::{get, post};
use axum::Router;

pub fn match_routes() -> Router<GameAppData> {
    Router::new()
        .route("/api/match/{match_id}/live", get(super::match_live_action))
        .route("/api/match/{match_id}/stream", get(super::match_stream_action))
        .route("/api/match/{match_id}/process", post(super::match_process_action))
        .route("/api/match/{match_id}/simulate", post(super::match_simulate_action))
        .route(
            "/api/match/{match_id}/force-finish",
            post(super::match_force_finish_action),
        )
        .route("/api/match/{match_id}/reset", post(super::match_reset_action))
        .route("/api/match/{match_id}/pause", post(super::match_pause_action))
        .route("/api/match/{match_id}/resume", post(super::match_resume_action))
}
