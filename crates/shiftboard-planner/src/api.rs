use async_trait::async_trait;
use shiftboard_core::types::{ClaimKey, TimeslotRecord, Volunteer};
use shiftboard_protocol::NewVolunteer;
use std::sync::Arc;

use crate::error::Result;

/// The REST surface the planner consumes.
///
/// [`crate::http::HttpScheduleApi`] is the production implementation; tests
/// swap in an in-memory fake.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// Volunteers whose normalised name matches. A 404 from the server is
    /// reported as an empty list.
    async fn find_volunteers(&self, first: &str, last: &str) -> Result<Vec<Volunteer>>;

    /// Every registered volunteer, for the picker.
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>>;

    async fn register_volunteer(&self, req: &NewVolunteer) -> Result<Volunteer>;

    /// All persisted claims, ordered by date then timeslot.
    async fn list_timeslots(&self) -> Result<Vec<TimeslotRecord>>;

    async fn create_timeslot(&self, key: &ClaimKey) -> Result<TimeslotRecord>;

    /// Returns the number of deleted rows.
    async fn delete_timeslot(&self, key: &ClaimKey) -> Result<u64>;
}

#[async_trait]
impl<A: ScheduleApi + ?Sized> ScheduleApi for Arc<A> {
    async fn find_volunteers(&self, first: &str, last: &str) -> Result<Vec<Volunteer>> {
        (**self).find_volunteers(first, last).await
    }

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        (**self).list_volunteers().await
    }

    async fn register_volunteer(&self, req: &NewVolunteer) -> Result<Volunteer> {
        (**self).register_volunteer(req).await
    }

    async fn list_timeslots(&self) -> Result<Vec<TimeslotRecord>> {
        (**self).list_timeslots().await
    }

    async fn create_timeslot(&self, key: &ClaimKey) -> Result<TimeslotRecord> {
        (**self).create_timeslot(key).await
    }

    async fn delete_timeslot(&self, key: &ClaimKey) -> Result<u64> {
        (**self).delete_timeslot(key).await
    }
}
