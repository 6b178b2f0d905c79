use serde::{Deserialize, Serialize};
use shiftboard_core::types::{normalize_name, ClaimKey, SlotDate, TimeSlot, VolunteerId};
use shiftboard_core::{Result, ShiftboardError};

/// Query string of `GET /volunteers`.
///
/// Both fields set: exact (normalised) name match. Both absent: the full
/// directory. Anything in between is rejected by [`VolunteerQuery::lookup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl VolunteerQuery {
    pub fn by_name(first: &str, last: &str) -> Self {
        Self {
            first: Some(normalize_name(first)),
            last: Some(normalize_name(last)),
        }
    }

    /// `Ok(Some((first, last)))` for a name lookup, `Ok(None)` for the
    /// directory listing.
    pub fn lookup(&self) -> Result<Option<(String, String)>> {
        match (self.first.as_deref(), self.last.as_deref()) {
            (None, None) => Ok(None),
            (Some(f), Some(l)) => Ok(Some((normalize_name(f), normalize_name(l)))),
            _ => Err(ShiftboardError::Validation(
                "first and last must be given together".to_string(),
            )),
        }
    }
}

/// Body of `POST /volunteers`.
/// Wire: `{ "first_name": "jane", "last_name": "doe", "role": "volunteer" }`
///
/// Missing fields deserialize as empty strings so that the handler can
/// answer 400 instead of failing JSON extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVolunteer {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
}

impl NewVolunteer {
    pub fn new(first_name: &str, last_name: &str, role: &str) -> Self {
        Self {
            first_name: normalize_name(first_name),
            last_name: normalize_name(last_name),
            role: role.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.role.trim().is_empty()
        {
            return Err(ShiftboardError::Validation(
                "first_name, last_name and role are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST /timeslots` and `POST /timeslots/delete`.
/// Wire: `{ "v_id": 7, "date": "2024-06-10", "timeslot": "10:00 - 12:00" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotBody {
    #[serde(default)]
    pub v_id: Option<VolunteerId>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timeslot: Option<String>,
}

impl TimeslotBody {
    /// Validate presence of every field and parse the date.
    pub fn into_key(self) -> Result<ClaimKey> {
        let missing = || {
            ShiftboardError::Validation("v_id, date and timeslot are required".to_string())
        };
        let v_id = self.v_id.filter(|id| id.get() > 0).ok_or_else(missing)?;
        let date = self.date.filter(|d| !d.trim().is_empty()).ok_or_else(missing)?;
        let timeslot = self
            .timeslot
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(missing)?;
        Ok(ClaimKey::new(v_id, SlotDate::parse(&date)?, TimeSlot::new(timeslot)))
    }
}

impl From<&ClaimKey> for TimeslotBody {
    fn from(key: &ClaimKey) -> Self {
        Self {
            v_id: Some(key.volunteer_id),
            date: Some(key.date.to_string()),
            timeslot: Some(key.timeslot.as_str().to_string()),
        }
    }
}

/// Response of `POST /timeslots/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: u64,
}

/// Error envelope for every non-2xx response.
/// Wire: `{ "error": "v_id, date and timeslot are required" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
