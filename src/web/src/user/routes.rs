use crate::GameAppData;
use axum::routing::get;
use axum::Router;

pub fn user_routes() -> Router<GameAppData> {
    Router::new().route("/api/user/{user_id}/notifications", get(super::user_notifications_action))
}
