//! REST server for shiftboard: axum routes over a [`shiftboard_store::ScheduleStore`].

pub mod app;
pub mod http;

pub use app::{build_router, AppState};
