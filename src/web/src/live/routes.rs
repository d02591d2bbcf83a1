use crate::GameAppData;
use axum::routing::get;
use axum::Router;

pub fn live_routes() -> Router<GameAppData> {
    Router::new().route("/api/live", get(super::live_list_action))
}
