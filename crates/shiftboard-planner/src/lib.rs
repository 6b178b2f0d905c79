//! Client side of shiftboard: resolves who is signing up, tracks which slots
//! they have staged and which the server has confirmed, and syncs the two.

pub mod api;
pub mod book;
pub mod error;
pub mod http;
pub mod identity;
pub mod notice;
pub mod planner;
pub mod sync;
pub mod week;

pub use api::ScheduleApi;
pub use book::{Claim, ClickEffect, SlotBook, SlotState};
pub use error::{ApiError, Result};
pub use http::HttpScheduleApi;
pub use identity::{ActiveVolunteer, IdentityResolver, IdentityStatus};
pub use notice::{Notice, NoticeLevel};
pub use planner::Planner;
pub use sync::{sync_pending, SyncFailure, SyncReport};
pub use week::WeekWindow;
