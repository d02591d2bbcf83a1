pub mod routes;

use crate::{ApiResult, GameAppData};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use core::{BatchEntry, MatchSummary};
use log::info;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEntryDto {
    pub match_id: u32,
    pub summary: Option<MatchSummary>,
    pub error: Option<String>,
}

impl From<BatchEntry> for RoundEntryDto {
    fn from(entry: BatchEntry) -> Self {
        let (summary, error) = match entry.result {
            Ok(summary) => (Some(summary), None),
            Err(error) => (None, Some(error.to_string())),
        };

        RoundEntryDto {
            match_id: entry.match_id,
            summary,
            error,
        }
    }
}

pub async fn round_simulate_action(
    State(state): State<GameAppData>,
    Path(round_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let simulation = Arc::clone(&state.simulator.simulation);
    let now = Instant::now();

    let entries = tokio::task::spawn_blocking(move || simulation.simulate_round(round_id)).await?;

    info!(
        "round {} simulated in {} ms",
        round_id,
        now.elapsed().as_millis()
    );

    let dto: Vec<RoundEntryDto> = entries.into_iter().map(RoundEntryDto::from).collect();

    Ok(Json(dto))
}
