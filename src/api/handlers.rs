//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{DecisionQuery, ErrorResponse, StateResponse};
use crate::sim::types::DecisionRecord;

/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let run = &state.run;
    Json(StateResponse {
        horizon: run.horizon,
        storage_capacity: run.storage_capacity,
        thresholds: run.thresholds,
        summary: run.summary.clone(),
        production_by_source: run.production_by_source.clone(),
        warnings: run.outcome.warnings.clone(),
        latest_decision: run.outcome.records.last().cloned(),
    })
}

/// Returns decision records, optionally filtered by index range.
///
/// `GET /decisions` → 200 + `Vec<DecisionRecord>` JSON
/// `GET /decisions?from=N&to=M` → filtered range (inclusive)
/// `GET /decisions?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_decisions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DecisionQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<DecisionRecord> = state
        .run
        .outcome
        .records
        .iter()
        .filter(|r| r.index >= from && r.index <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}
