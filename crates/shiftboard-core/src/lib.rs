pub mod config;
pub mod error;
pub mod types;

pub use error::{Result, ShiftboardError};
pub use types::{ClaimKey, SlotDate, TimeSlot, TimeslotRecord, Volunteer, VolunteerId};
