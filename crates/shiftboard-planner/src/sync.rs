use futures_util::future::join_all;
use shiftboard_core::types::ClaimKey;
use tracing::{info, warn};

use crate::api::ScheduleApi;
use crate::book::SlotBook;
use crate::error::ApiError;
use crate::notice::Notice;

#[derive(Debug)]
pub struct SyncFailure {
    pub key: ClaimKey,
    pub error: ApiError,
}

/// Per-claim outcome of one sync.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub confirmed: Vec<ClaimKey>,
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// `None` when nothing was attempted.
    pub fn notice(&self) -> Option<Notice> {
        if self.confirmed.is_empty() && self.failed.is_empty() {
            return None;
        }
        if self.is_clean() {
            return Some(Notice::success("All new timeslots have been registered!"));
        }
        Some(Notice::error(format!(
            "{} of {} timeslots could not be registered. They are still pending.",
            self.failed.len(),
            self.failed.len() + self.confirmed.len()
        )))
    }
}

/// Send every pending claim to the server at once.
///
/// Successes move to confirmed. Failures stay pending and are listed in the
/// report; nothing is retried.
pub async fn sync_pending<A: ScheduleApi + ?Sized>(api: &A, book: &mut SlotBook) -> SyncReport {
    let keys = book.pending_keys();
    if keys.is_empty() {
        return SyncReport::default();
    }
    info!(count = keys.len(), "syncing pending claims");

    let results = join_all(keys.iter().map(|key| api.create_timeslot(key))).await;

    let mut report = SyncReport::default();
    for (key, result) in keys.into_iter().zip(results) {
        match result {
            Ok(record) => {
                book.promote(&key, record);
                report.confirmed.push(key);
            }
            Err(error) => {
                warn!(%key, error = %error, "timeslot registration failed");
                report.failed.push(SyncFailure { key, error });
            }
        }
    }
    info!(
        confirmed = report.confirmed.len(),
        failed = report.failed.len(),
        "sync finished"
    );
    report
}
