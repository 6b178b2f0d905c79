use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;
use shiftboard_core::types::{ClaimKey, TimeslotRecord, Volunteer};
use tracing::{debug, info, instrument};

use crate::db::init_db;
use crate::error::{Result, StoreError};
use crate::{timeslots, volunteers};

/// Thread-safe handle over the schedule database.
///
/// Wraps a single SQLite connection in a `Mutex`; each method holds the lock
/// for one statement group only.
pub struct ScheduleStore {
    db: Mutex<Connection>,
}

impl ScheduleStore {
    /// Wrap an open connection, creating the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Open (or create) the database file at `path` with WAL and foreign keys on.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        info!(path, "schedule database opened");
        Self::new(conn)
    }

    /// Private in-memory database, used by tests and throwaway servers.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Self::new(conn)
    }

    #[instrument(skip(self))]
    pub fn register_volunteer(&self, first_name: &str, last_name: &str, role: &str) -> Result<Volunteer> {
        let volunteer = volunteers::create_volunteer(&self.conn(), first_name, last_name, role)?;
        info!(volunteer_id = %volunteer.id, role = %volunteer.role, "volunteer registered");
        Ok(volunteer)
    }

    #[instrument(skip(self))]
    pub fn find_volunteers(&self, first_name: &str, last_name: &str) -> Result<Vec<Volunteer>> {
        let found = volunteers::find_by_name(&self.conn(), first_name, last_name)?;
        debug!(matches = found.len(), "volunteer lookup");
        Ok(found)
    }

    pub fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        volunteers::list_volunteers(&self.conn())
    }

    #[instrument(skip(self), fields(key = %key))]
    pub fn claim(&self, key: &ClaimKey) -> Result<TimeslotRecord> {
        let record = timeslots::create_timeslot(&self.conn(), key)?;
        info!("timeslot claimed");
        Ok(record)
    }

    pub fn list_claims(&self) -> Result<Vec<TimeslotRecord>> {
        timeslots::list_timeslots(&self.conn())
    }

    /// Delete a claim. `NotFound` when no row matched.
    #[instrument(skip(self), fields(key = %key))]
    pub fn release(&self, key: &ClaimKey) -> Result<usize> {
        let n = timeslots::delete_timeslot(&self.conn(), key)?;
        if n == 0 {
            return Err(StoreError::NotFound(format!("timeslot {key}")));
        }
        info!(deleted = n, "timeslot released");
        Ok(n)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite consistent; keep serving.
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftboard_core::types::{SlotDate, TimeSlot, VolunteerId};

    fn key(v: VolunteerId, date: &str, slot: &str) -> ClaimKey {
        ClaimKey::new(v, SlotDate::parse(date).unwrap(), TimeSlot::new(slot))
    }

    #[test]
    fn register_and_find_by_normalised_name() {
        let store = ScheduleStore::in_memory().unwrap();
        let jane = store.register_volunteer(" Jane ", "DOE", "volunteer").unwrap();
        assert_eq!(jane.first_name, "jane");
        assert_eq!(jane.last_name, "doe");

        let found = store.find_volunteers("JANE", "doe").unwrap();
        assert_eq!(found, vec![jane]);
        assert!(store.find_volunteers("john", "doe").unwrap().is_empty());
    }

    #[test]
    fn register_rejects_blank_fields() {
        let store = ScheduleStore::in_memory().unwrap();
        assert!(matches!(
            store.register_volunteer("jane", "  ", "volunteer"),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn directory_is_sorted_by_last_name() {
        let store = ScheduleStore::in_memory().unwrap();
        store.register_volunteer("zoe", "adams", "volunteer").unwrap();
        store.register_volunteer("amy", "young", "coordinator").unwrap();
        let names: Vec<_> = store
            .list_volunteers()
            .unwrap()
            .into_iter()
            .map(|v| v.last_name)
            .collect();
        assert_eq!(names, vec!["adams", "young"]);
    }

    #[test]
    fn claim_stores_date_verbatim() {
        let store = ScheduleStore::in_memory().unwrap();
        let jane = store.register_volunteer("jane", "doe", "volunteer").unwrap();
        let rec = store.claim(&key(jane.id, "2024-06-10", "10:00 - 12:00")).unwrap();
        assert_eq!(rec.date.to_string(), "2024-06-10");
        assert_eq!(rec.v_name, "Jane Doe");
        assert_eq!(rec.role, "volunteer");
    }

    #[test]
    fn claim_is_idempotent() {
        let store = ScheduleStore::in_memory().unwrap();
        let jane = store.register_volunteer("jane", "doe", "volunteer").unwrap();
        let k = key(jane.id, "2024-06-10", "10:00 - 12:00");
        store.claim(&k).unwrap();
        store.claim(&k).unwrap();
        assert_eq!(store.list_claims().unwrap().len(), 1);
    }

    #[test]
    fn claim_for_unknown_volunteer_is_not_found() {
        let store = ScheduleStore::in_memory().unwrap();
        let err = store
            .claim(&key(VolunteerId(99), "2024-06-10", "8:00 - 10:00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn several_volunteers_may_share_a_slot() {
        let store = ScheduleStore::in_memory().unwrap();
        let jane = store.register_volunteer("jane", "doe", "volunteer").unwrap();
        let john = store.register_volunteer("john", "roe", "volunteer").unwrap();
        store.claim(&key(jane.id, "2024-06-10", "8:00 - 10:00")).unwrap();
        store.claim(&key(john.id, "2024-06-10", "8:00 - 10:00")).unwrap();
        assert_eq!(store.list_claims().unwrap().len(), 2);
    }

    #[test]
    fn claims_are_ordered_by_date_then_timeslot() {
        let store = ScheduleStore::in_memory().unwrap();
        let jane = store.register_volunteer("jane", "doe", "volunteer").unwrap();
        store.claim(&key(jane.id, "2024-06-11", "12:00 - 14:00")).unwrap();
        store.claim(&key(jane.id, "2024-06-10", "14:00 - 16:00")).unwrap();
        store.claim(&key(jane.id, "2024-06-10", "12:00 - 14:00")).unwrap();
        let order: Vec<_> = store
            .list_claims()
            .unwrap()
            .into_iter()
            .map(|r| format!("{} {}", r.date, r.timeslot))
            .collect();
        assert_eq!(
            order,
            vec![
                "2024-06-10 12:00 - 14:00",
                "2024-06-10 14:00 - 16:00",
                "2024-06-11 12:00 - 14:00",
            ]
        );
    }

    #[test]
    fn release_missing_claim_is_not_found() {
        let store = ScheduleStore::in_memory().unwrap();
        let jane = store.register_volunteer("jane", "doe", "volunteer").unwrap();
        let k = key(jane.id, "2024-06-10", "8:00 - 10:00");
        assert!(matches!(store.release(&k), Err(StoreError::NotFound(_))));

        store.claim(&k).unwrap();
        assert_eq!(store.release(&k).unwrap(), 1);
        assert!(store.list_claims().unwrap().is_empty());
    }
}
