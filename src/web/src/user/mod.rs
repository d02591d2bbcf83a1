pub mod routes;

use crate::common::sse::broadcast_stream;
use crate::GameAppData;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

pub async fn user_notifications_action(
    State(state): State<GameAppData>,
    Path(user_id): Path<u32>,
) -> impl IntoResponse {
    let receiver = state.simulator.notifications.subscribe(user_id);

    broadcast_stream(receiver, "result")
}
