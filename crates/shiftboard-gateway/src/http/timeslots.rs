//! `/timeslots`: list, claim and release.
//!
//! Dates travel as plain `YYYY-MM-DD` and are stored exactly as received.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use shiftboard_core::types::TimeslotRecord;
use shiftboard_protocol::{DeleteResponse, TimeslotBody};
use std::sync::Arc;

use super::error::HttpResult;
use crate::app::AppState;

/// GET /timeslots: every claim, by date then timeslot.
pub async fn list(State(state): State<Arc<AppState>>) -> HttpResult<Json<Vec<TimeslotRecord>>> {
    Ok(Json(state.store.list_claims()?))
}

/// POST /timeslots: claiming an already held slot returns the existing row.
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TimeslotBody>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<TimeslotRecord>)> {
    let Json(body) = payload?;
    let key = body.into_key()?;
    let record = state.store.claim(&key)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /timeslots/delete
pub async fn delete(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TimeslotBody>, JsonRejection>,
) -> HttpResult<Json<DeleteResponse>> {
    let Json(body) = payload?;
    let key = body.into_key()?;
    let deleted = state.store.release(&key)?;
    Ok(Json(DeleteResponse {
        message: "Timeslot deleted".to_string(),
        deleted: deleted as u64,
    }))
}
