use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ShiftboardError};

/// Role assigned to volunteers registered through the one-click flow.
pub const DEFAULT_ROLE: &str = "volunteer";

/// Length of every grid slot, in hours.
pub const SLOT_HOURS: u32 = 2;

/// Grid rows, in display order.
pub const TIME_SLOTS: [&str; 7] = [
    "8:00 - 10:00",
    "10:00 - 12:00",
    "12:00 - 14:00",
    "14:00 - 16:00",
    "16:00 - 18:00",
    "18:00 - 20:00",
    "20:00 - 22:00",
];

/// Storage and wire format shared by client and server.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Primary key of a volunteer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolunteerId(pub i64);

impl VolunteerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VolunteerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A calendar date as it crosses the client/server boundary.
///
/// The only accepted text form is `YYYY-MM-DD`. Both sides parse and format
/// through this type, so a date computed for a grid column is stored and
/// compared as exactly that day with no timezone shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotDate(NaiveDate);

impl SlotDate {
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ShiftboardError::InvalidDate(s.to_string()))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ShiftboardError::InvalidDate(format!("{year}-{month}-{day}")))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for SlotDate {
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl From<SlotDate> for NaiveDate {
    fn from(d: SlotDate) -> Self {
        d.0
    }
}

impl TryFrom<String> for SlotDate {
    type Error = ShiftboardError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<SlotDate> for String {
    fn from(d: SlotDate) -> Self {
        d.to_string()
    }
}

impl fmt::Display for SlotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for SlotDate {
    type Err = ShiftboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Label of a grid row, e.g. `"10:00 - 12:00"`.
///
/// Kept as free text: the server stores whatever label the client sends.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(pub String);

impl TimeSlot {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The seven standard rows of the weekly grid.
    pub fn all() -> Vec<TimeSlot> {
        TIME_SLOTS.iter().map(|s| TimeSlot::new(*s)).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Row header text: the start time only (`"10:00"`).
    pub fn start_label(&self) -> &str {
        self.0.split(" - ").next().unwrap_or(&self.0)
    }

    pub fn is_standard(&self) -> bool {
        TIME_SLOTS.contains(&self.0.as_str())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A registered volunteer. Names are stored normalised (see [`normalize_name`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl Volunteer {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// One persisted claim, joined with the owning volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotRecord {
    pub v_id: VolunteerId,
    pub date: SlotDate,
    pub timeslot: TimeSlot,
    pub v_name: String,
    pub role: String,
}

impl TimeslotRecord {
    pub fn key(&self) -> ClaimKey {
        ClaimKey::new(self.v_id, self.date, self.timeslot.clone())
    }
}

/// Identity of a claim: one volunteer in one slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClaimKey {
    pub volunteer_id: VolunteerId,
    pub date: SlotDate,
    pub timeslot: TimeSlot,
}

impl ClaimKey {
    pub fn new(volunteer_id: VolunteerId, date: SlotDate, timeslot: TimeSlot) -> Self {
        Self {
            volunteer_id,
            date,
            timeslot,
        }
    }
}

impl fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} {}", self.volunteer_id, self.date, self.timeslot)
    }
}

/// Canonical stored form of a name: trimmed and lowercased.
pub fn normalize_name(s: &str) -> String {
    s.trim().to_lowercase()
}

/// `"jANE"` → `"Jane"`. Empty input stays empty.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Display form used on grid cells and volunteer cards, e.g. `"Jane Doe"`.
pub fn display_name(first: &str, last: &str) -> String {
    format!("{} {}", capitalize(first.trim()), capitalize(last.trim()))
}
