use crate::GameAppData;
use axum::routing::post;
use axum::Router;

pub fn round_routes() -> Router<GameAppData> {
    Router::new().route("/api/round/{round_id}/simulate", post(super::round_simulate_action))
}
