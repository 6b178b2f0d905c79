//! `shiftboard-store`: SQLite persistence for volunteers and their timeslot
//! claims.
//!
//! The free functions in [`volunteers`] and [`timeslots`] take a borrowed
//! `Connection` and run one statement group each. [`ScheduleStore`] owns the
//! connection behind a mutex and is what the gateway holds in its state.

pub mod db;
pub mod error;
pub mod manager;
pub mod timeslots;
pub mod volunteers;

pub use error::{Result, StoreError};
pub use manager::ScheduleStore;
