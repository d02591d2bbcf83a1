pub mod routes;

use crate::GameAppData;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn live_list_action(State(state): State<GameAppData>) -> impl IntoResponse {
    Json(state.simulator.tracker.live_matches())
}
