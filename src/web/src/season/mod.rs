pub mod routes;

use crate::{ApiError, ApiResult, GameAppData};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn season_standings_action(
    State(state): State<GameAppData>,
    Path(season_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let table = state.simulator.ranking.table(season_id);

    if table.is_empty() {
        return Err(ApiError::NotFound(format!("season {} has no standings", season_id)));
    }

    Ok(Json(table))
}
