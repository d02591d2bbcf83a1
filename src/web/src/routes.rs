use crate::common::default_handler::default_handler;
use crate::live::routes::live_routes;
use crate::r#match::routes::match_routes;
use crate::round::routes::round_routes;
use crate::season::routes::season_routes;
use crate::user::routes::user_routes;
use crate::GameAppData;
use axum::Router;

pub struct ServerRoutes;

impl ServerRoutes {
    pub fn create() -> Router<GameAppData> {
        Router::<GameAppData>::new()
            .merge(live_routes())
            .merge(match_routes())
            .merge(round_routes())
            .merge(season_routes())
            .merge(user_routes())
            .fallback(default_handler)
    }
}
