#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;
use chrono::NaiveDate;
use shiftboard_core::types::{display_name, ClaimKey, SlotDate, TimeSlot, TimeslotRecord, Volunteer, VolunteerId};
use shiftboard_planner::error::{ApiError, Result};
use shiftboard_planner::ScheduleApi;
use shiftboard_protocol::NewVolunteer;

/// In-memory stand-in for the gateway.
#[derive(Default)]
pub struct FakeApi {
    volunteers: Mutex<Vec<Volunteer>>,
    claims: Mutex<Vec<TimeslotRecord>>,
    /// Slots whose create call fails with a 500.
    reject: Mutex<BTreeSet<TimeSlot>>,
    pub fail_lookups: Mutex<bool>,
    pub fail_deletes: Mutex<bool>,
    /// Makes both listing endpoints unreachable.
    pub fail_listings: Mutex<bool>,
    /// When set, every create waits here until `n` creates are in flight.
    gate: Mutex<Option<Arc<Barrier>>>,
    pub creates: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volunteer(self, id: i64, first: &str, last: &str) -> Self {
        self.volunteers.lock().unwrap().push(Volunteer {
            id: VolunteerId(id),
            first_name: first.to_lowercase(),
            last_name: last.to_lowercase(),
            role: "volunteer".into(),
        });
        self
    }

    pub fn with_claim(self, id: i64, date: &str, slot: &str) -> Self {
        let record = self.record(&ClaimKey::new(
            VolunteerId(id),
            SlotDate::parse(date).unwrap(),
            TimeSlot::new(slot),
        ));
        self.claims.lock().unwrap().push(record.unwrap());
        self
    }

    pub fn reject_slot(&self, slot: &str) {
        self.reject.lock().unwrap().insert(TimeSlot::new(slot));
    }

    pub fn gate_creates(&self, n: usize) {
        *self.gate.lock().unwrap() = Some(Arc::new(Barrier::new(n)));
    }

    pub fn clear_rejections(&self) {
        self.reject.lock().unwrap().clear();
    }

    pub fn volunteers(&self) -> Vec<Volunteer> {
        self.volunteers.lock().unwrap().clone()
    }

    pub fn claims(&self) -> Vec<TimeslotRecord> {
        self.claims.lock().unwrap().clone()
    }

    fn record(&self, key: &ClaimKey) -> Result<TimeslotRecord> {
        let volunteers = self.volunteers.lock().unwrap();
        let v = volunteers
            .iter()
            .find(|v| v.id == key.volunteer_id)
            .ok_or_else(|| ApiError::NotFound("Volunteer not found".into()))?;
        Ok(TimeslotRecord {
            v_id: v.id,
            date: key.date,
            timeslot: key.timeslot.clone(),
            v_name: display_name(&v.first_name, &v.last_name),
            role: v.role.clone(),
        })
    }
}

#[async_trait]
impl ScheduleApi for FakeApi {
    async fn find_volunteers(&self, first: &str, last: &str) -> Result<Vec<Volunteer>> {
        if *self.fail_lookups.lock().unwrap() {
            return Err(ApiError::Unavailable("connection refused".into()));
        }
        Ok(self
            .volunteers
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.first_name == first && v.last_name == last)
            .cloned()
            .collect())
    }

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        if *self.fail_listings.lock().unwrap() {
            return Err(ApiError::Unavailable("connection refused".into()));
        }
        Ok(self.volunteers.lock().unwrap().clone())
    }

    async fn register_volunteer(&self, req: &NewVolunteer) -> Result<Volunteer> {
        req.validate().map_err(|e| ApiError::Validation(e.to_string()))?;
        let mut volunteers = self.volunteers.lock().unwrap();
        let v = Volunteer {
            id: VolunteerId(volunteers.len() as i64 + 1),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            role: req.role.clone(),
        };
        volunteers.push(v.clone());
        Ok(v)
    }

    async fn list_timeslots(&self) -> Result<Vec<TimeslotRecord>> {
        if *self.fail_listings.lock().unwrap() {
            return Err(ApiError::Unavailable("connection refused".into()));
        }
        Ok(self.claims())
    }

    async fn create_timeslot(&self, key: &ClaimKey) -> Result<TimeslotRecord> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(barrier) = gate {
            barrier.wait().await;
        }
        if self.reject.lock().unwrap().contains(&key.timeslot) {
            return Err(ApiError::Server {
                status: 500,
                message: "Internal server error".into(),
            });
        }
        let record = self.record(key)?;
        let mut claims = self.claims.lock().unwrap();
        if !claims.iter().any(|c| c.key() == *key) {
            claims.push(record.clone());
        }
        Ok(record)
    }

    async fn delete_timeslot(&self, key: &ClaimKey) -> Result<u64> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if *self.fail_deletes.lock().unwrap() {
            return Err(ApiError::Unavailable("connection reset".into()));
        }
        let mut claims = self.claims.lock().unwrap();
        let before = claims.len();
        claims.retain(|c| c.key() != *key);
        match before - claims.len() {
            0 => Err(ApiError::NotFound("Timeslot not found".into())),
            n => Ok(n as u64),
        }
    }
}

/// Wednesday 2024-06-12; its week runs Sun 9 to Sat 15 June.
pub fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
}

pub fn slot(label: &str) -> TimeSlot {
    TimeSlot::new(label)
}
