use chrono::Utc;
use rusqlite::{params, Connection};
use shiftboard_core::types::{normalize_name, Volunteer, VolunteerId};

use crate::error::{Result, StoreError};

const VOLUNTEER_COLUMNS: &str = "id, first_name, last_name, role";

fn row_to_volunteer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Volunteer> {
    Ok(Volunteer {
        id: VolunteerId(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        role: row.get(3)?,
    })
}

/// Insert a volunteer. Names are normalised here so every writer agrees on
/// the stored form; the generated id is returned in the record.
pub fn create_volunteer(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    role: &str,
) -> Result<Volunteer> {
    let first = normalize_name(first_name);
    let last = normalize_name(last_name);
    let role = role.trim();
    if first.is_empty() || last.is_empty() || role.is_empty() {
        return Err(StoreError::Invalid(
            "first_name, last_name and role are required".to_string(),
        ));
    }

    conn.execute(
        "INSERT INTO volunteers (first_name, last_name, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![first, last, role, Utc::now().to_rfc3339()],
    )?;
    Ok(Volunteer {
        id: VolunteerId(conn.last_insert_rowid()),
        first_name: first,
        last_name: last,
        role: role.to_string(),
    })
}

/// All volunteers whose normalised name matches. Usually zero or one, but
/// nothing stops two people sharing a name.
pub fn find_by_name(conn: &Connection, first_name: &str, last_name: &str) -> Result<Vec<Volunteer>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VOLUNTEER_COLUMNS} FROM volunteers
         WHERE first_name = ?1 AND last_name = ?2
         ORDER BY id"
    ))?;
    let rows = stmt
        .query_map(
            params![normalize_name(first_name), normalize_name(last_name)],
            row_to_volunteer,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Directory listing for the volunteer picker.
pub fn list_volunteers(conn: &Connection) -> Result<Vec<Volunteer>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VOLUNTEER_COLUMNS} FROM volunteers ORDER BY last_name, first_name, id"
    ))?;
    let rows = stmt
        .query_map([], row_to_volunteer)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Load by primary key. `None` when absent; callers decide if that is an error.
pub fn get_volunteer(conn: &Connection, id: VolunteerId) -> Result<Option<Volunteer>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE id = ?1"
    ))?;
    match stmt.query_row(params![id.get()], row_to_volunteer) {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StoreError::Database(e)),
    }
}
