use crate::GameAppData;
use axum::routing::get;
use axum::Router;

pub fn season_routes() -> Router<GameAppData> {
    Router::new().route("/api/season/{season_id}/standings", get(super::season_standings_action))
}
