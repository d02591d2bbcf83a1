pub mod routes;

use crate::common::sse::broadcast_stream;
use crate::{ApiError, ApiResult, GameAppData};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use core::{
    FinalizeOutcome, ForceFinishOutcome, ForcedResult, LiveSubscription, ProcessOutcome,
    ResetOutcome,
};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SimulateParams {
    pub forced: Option<ForcedResult>,
}

#[derive(Deserialize)]
pub struct PauseParams {
    pub reason: Option<String>,
}

pub async fn match_live_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    state
        .simulator
        .tracker
        .get_live_data(match_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("match {} is not live", match_id)))
}

pub async fn match_stream_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    match state.simulator.subscribe_live(match_id) {
        LiveSubscription::Live(receiver) => Ok(broadcast_stream(receiver, "snapshot")),
        LiveSubscription::Finished => Err(ApiError::NotFound(format!(
            "match {} is already finished",
            match_id
        ))),
        LiveSubscription::NotFound => {
            Err(ApiError::NotFound(format!("match {} not found", match_id)))
        }
    }
}

pub async fn match_process_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    match state.simulator.processor.dispatch(match_id).await? {
        ProcessOutcome::Started(summary) => Ok(Json(summary)),
        ProcessOutcome::Skipped { status, .. } => Err(ApiError::Conflict(format!(
            "match {} is {:?}",
            match_id, status
        ))),
        ProcessOutcome::AlreadyRunning(_) => Err(ApiError::Conflict(format!(
            "match {} is already being processed",
            match_id
        ))),
        ProcessOutcome::Failed(error) => Err(error.into()),
    }
}

pub async fn match_simulate_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
    Query(params): Query<SimulateParams>,
) -> ApiResult<impl IntoResponse> {
    let simulation = Arc::clone(&state.simulator.simulation);

    let summary =
        tokio::task::spawn_blocking(move || simulation.simulate(match_id, params.forced)).await??;

    Ok(Json(summary))
}

pub async fn match_force_finish_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<FinalizeOutcome>> {
    info!("force finish requested for match {}", match_id);

    match state.simulator.tracker.force_finish(match_id) {
        ForceFinishOutcome::Finalized(outcome) => Ok(Json(outcome)),
        ForceFinishOutcome::SessionNotFound => Err(ApiError::NotFound(format!(
            "match {} has no live session",
            match_id
        ))),
    }
}

pub async fn match_reset_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<ResetOutcome>> {
    info!("reset requested for match {}", match_id);

    match state.simulator.tracker.reset(match_id) {
        ResetOutcome::MatchNotFound { .. } => {
            Err(ApiError::NotFound(format!("match {} not found", match_id)))
        }
        outcome => Ok(Json(outcome)),
    }
}

pub async fn match_pause_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
    Query(params): Query<PauseParams>,
) -> ApiResult<impl IntoResponse> {
    let tracker = &state.simulator.tracker;

    if !tracker.pause(match_id, params.reason) {
        return Err(ApiError::Conflict(format!(
            "match {} is not live or already paused",
            match_id
        )));
    }

    tracker
        .get_live_data(match_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("match {} is not live", match_id)))
}

pub async fn match_resume_action(
    State(state): State<GameAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let tracker = &state.simulator.tracker;

    if !tracker.resume(match_id) {
        return Err(ApiError::Conflict(format!("match {} is not paused", match_id)));
    }

    tracker
        .get_live_data(match_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("match {} is not live", match_id)))
}
