use rusqlite::Connection;

use crate::error::Result;

/// Initialise the schema in `conn`. Idempotent; safe to call on every startup.
pub fn init_db(conn: &Connection) -> Result<()> {
    create_volunteers_table(conn)?;
    create_timeslots_table(conn)?;
    Ok(())
}

fn create_volunteers_table(conn: &Connection) -> Result<()> {
    // Names are stored lowercased; lookups compare the normalised form.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS volunteers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'volunteer',
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_volunteers_name
            ON volunteers (first_name, last_name);",
    )?;
    Ok(())
}

fn create_timeslots_table(conn: &Connection) -> Result<()> {
    // date is always YYYY-MM-DD text, so lexical order is calendar order.
    // UNIQUE(v_id, date, timeslot): one claim per volunteer per slot. Several
    // volunteers may still share a slot.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS timeslots (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            v_id        INTEGER NOT NULL REFERENCES volunteers(id) ON DELETE CASCADE,
            date        TEXT NOT NULL,
            timeslot    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            UNIQUE(v_id, date, timeslot)
        );
        CREATE INDEX IF NOT EXISTS idx_timeslots_date
            ON timeslots (date, timeslot);",
    )?;
    Ok(())
}
