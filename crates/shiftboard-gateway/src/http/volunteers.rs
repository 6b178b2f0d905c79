//! `/volunteers`: name lookup, directory listing and registration.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use shiftboard_core::types::Volunteer;
use shiftboard_protocol::{NewVolunteer, VolunteerQuery};
use std::sync::Arc;
use tracing::debug;

use super::error::HttpResult;
use crate::app::AppState;

/// GET /volunteers?first=&last=: exact normalised match, or the whole
/// directory when both parameters are absent.
pub async fn list_or_find(
    State(state): State<Arc<AppState>>,
    query: Result<Query<VolunteerQuery>, QueryRejection>,
) -> HttpResult<Json<Vec<Volunteer>>> {
    let Query(query) = query?;
    let found = match query.lookup()? {
        Some((first, last)) => state.store.find_volunteers(&first, &last)?,
        None => state.store.list_volunteers()?,
    };
    debug!(count = found.len(), "volunteers returned");
    Ok(Json(found))
}

/// POST /volunteers: 201 with the stored record.
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewVolunteer>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<Volunteer>)> {
    let Json(body) = payload?;
    let req = NewVolunteer::new(&body.first_name, &body.last_name, &body.role);
    req.validate()?;
    let volunteer = state
        .store
        .register_volunteer(&req.first_name, &req.last_name, &req.role)?;
    Ok((StatusCode::CREATED, Json(volunteer)))
}
