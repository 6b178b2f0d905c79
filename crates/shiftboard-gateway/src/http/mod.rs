pub mod error;
pub mod health;
pub mod timeslots;
pub mod volunteers;
