use chrono::Utc;
use rusqlite::{params, Connection};
use shiftboard_core::types::{display_name, ClaimKey, SlotDate, TimeSlot, TimeslotRecord, VolunteerId};

use crate::error::{Result, StoreError};
use crate::volunteers::get_volunteer;

const RECORD_SELECT_SQL: &str = "SELECT t.v_id, t.date, t.timeslot, v.first_name, v.last_name, v.role
     FROM timeslots t
     JOIN volunteers v ON v.id = t.v_id";

/// Raw row; the date is parsed afterwards so a bad value maps to `Corrupt`
/// rather than an opaque rusqlite conversion error.
type RawRecord = (i64, String, String, String, String, String);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok((
        row.get(0)?, // v_id
        row.get(1)?, // date
        row.get(2)?, // timeslot
        row.get(3)?, // first_name
        row.get(4)?, // last_name
        row.get(5)?, // role
    ))
}

fn raw_to_record(raw: RawRecord) -> Result<TimeslotRecord> {
    let (v_id, date, timeslot, first, last, role) = raw;
    let date = SlotDate::parse(&date).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok(TimeslotRecord {
        v_id: VolunteerId(v_id),
        date,
        timeslot: TimeSlot::new(timeslot),
        v_name: display_name(&first, &last),
        role,
    })
}

/// Persist a claim and return it joined with the volunteer.
///
/// Re-inserting an existing (v_id, date, timeslot) is a no-op that returns
/// the stored record, so a client re-submitting after a partial sync failure
/// does not create duplicates.
pub fn create_timeslot(conn: &Connection, key: &ClaimKey) -> Result<TimeslotRecord> {
    if get_volunteer(conn, key.volunteer_id)?.is_none() {
        return Err(StoreError::NotFound(format!("volunteer {}", key.volunteer_id)));
    }

    conn.execute(
        "INSERT INTO timeslots (v_id, date, timeslot, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (v_id, date, timeslot) DO NOTHING",
        params![
            key.volunteer_id.get(),
            key.date.to_string(),
            key.timeslot.as_str(),
            Utc::now().to_rfc3339(),
        ],
    )?;

    get_timeslot(conn, key)?
        .ok_or_else(|| StoreError::NotFound(format!("timeslot {key}")))
}

pub fn get_timeslot(conn: &Connection, key: &ClaimKey) -> Result<Option<TimeslotRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{RECORD_SELECT_SQL} WHERE t.v_id = ?1 AND t.date = ?2 AND t.timeslot = ?3"
    ))?;
    let raw = match stmt.query_row(
        params![key.volunteer_id.get(), key.date.to_string(), key.timeslot.as_str()],
        row_to_raw,
    ) {
        Ok(r) => r,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(StoreError::Database(e)),
    };
    raw_to_record(raw).map(Some)
}

/// Every claim, ordered by date then timeslot label.
pub fn list_timeslots(conn: &Connection) -> Result<Vec<TimeslotRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{RECORD_SELECT_SQL} ORDER BY t.date ASC, t.timeslot ASC, t.v_id ASC"
    ))?;
    let raws = stmt
        .query_map([], row_to_raw)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    raws.into_iter().map(raw_to_record).collect()
}

/// Remove a claim. Returns the number of rows deleted (0 or 1 given the
/// UNIQUE constraint).
pub fn delete_timeslot(conn: &Connection, key: &ClaimKey) -> Result<usize> {
    let n = conn.execute(
        "DELETE FROM timeslots WHERE v_id = ?1 AND date = ?2 AND timeslot = ?3",
        params![key.volunteer_id.get(), key.date.to_string(), key.timeslot.as_str()],
    )?;
    Ok(n)
}
