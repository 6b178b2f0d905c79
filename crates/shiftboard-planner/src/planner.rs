use chrono::NaiveDate;
use shiftboard_core::error::ShiftboardError;
use shiftboard_core::types::{ClaimKey, SlotDate, TimeSlot, Volunteer};
use tracing::{info, warn};

use crate::api::ScheduleApi;
use crate::book::{ClickEffect, SlotBook, SlotState, VolunteerCard, VolunteerStats};
use crate::identity::{ActiveVolunteer, IdentityResolver, IdentityStatus};
use crate::notice::Notice;
use crate::sync::{sync_pending, SyncReport};
use crate::week::{WeekWindow, DAYS_PER_WEEK};

/// One planner session: the typed identity, the claim book and the visible week.
pub struct Planner<A: ScheduleApi> {
    api: A,
    identity: IdentityResolver,
    book: SlotBook,
    today: NaiveDate,
    window: WeekWindow,
}

impl<A: ScheduleApi> Planner<A> {
    pub fn new(api: A, today: NaiveDate, default_role: &str) -> Result<Self, ShiftboardError> {
        let window = WeekWindow::current(today)
            .ok_or_else(|| ShiftboardError::InvalidDate(today.to_string()))?;
        Ok(Self {
            api,
            identity: IdentityResolver::new(default_role),
            book: SlotBook::new(),
            today,
            window,
        })
    }

    pub fn book(&self) -> &SlotBook {
        &self.book
    }

    pub fn identity(&self) -> &IdentityResolver {
        &self.identity
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    /// Reload confirmed claims and the volunteer directory. When both loads
    /// fail the two messages are joined into one error notice.
    pub async fn refresh(&mut self) -> Option<Notice> {
        let notice = match self.api.list_timeslots().await {
            Ok(records) => {
                info!(count = records.len(), "timeslots loaded");
                self.book.replace_confirmed(records);
                None
            }
            Err(e) => {
                warn!(error = %e, "timeslot load failed");
                Some(Notice::error(format!("Could not load timeslots: {e}")))
            }
        };
        let directory = self.identity.load_directory(&self.api).await;
        match (notice, directory) {
            (Some(timeslots), Some(volunteers)) => Some(Notice::error(format!(
                "{}; {}",
                timeslots.message, volunteers.message
            ))),
            (timeslots, volunteers) => timeslots.or(volunteers),
        }
    }

    /// Toggle the active volunteer on the cell at column `day_index` of the
    /// visible week.
    pub async fn click(&mut self, day_index: usize, timeslot: &TimeSlot) -> Option<Notice> {
        let date = self.window.date_at(day_index)?;
        self.click_date(SlotDate::from(date), timeslot).await
    }

    pub async fn click_date(&mut self, date: SlotDate, timeslot: &TimeSlot) -> Option<Notice> {
        let effect = self.book.click(self.identity.active(), date, timeslot);
        match effect {
            ClickEffect::Ignored => Some(Notice::info("Find or register a volunteer before selecting slots.")),
            ClickEffect::Staged(_) | ClickEffect::Unstaged(_) => None,
            ClickEffect::Released(claim) => match self.api.delete_timeslot(&claim.key).await {
                Ok(_) => {
                    info!(key = %claim.key, "timeslot deleted");
                    Some(Notice::success("Time slot has been permanently deleted!"))
                }
                Err(e) => {
                    warn!(key = %claim.key, error = %e, "timeslot delete failed");
                    Some(Notice::error(format!("Failed to delete time slot: {e}")))
                }
            },
        }
    }

    /// Push every pending claim to the server.
    pub async fn sync(&mut self) -> SyncReport {
        sync_pending(&self.api, &mut self.book).await
    }

    pub fn next_week(&mut self) {
        if let Some(next) = self.window.next() {
            self.window = next;
        }
    }

    pub fn previous_week(&mut self) {
        if let Some(prev) = self.window.previous() {
            self.window = prev;
        }
    }

    /// Back to the week containing today.
    pub fn current_week(&mut self) {
        self.set_week_offset(0);
    }

    /// Jump straight to the week `offset` weeks from today's. Returns false,
    /// leaving the visible week alone, when that week cannot be represented.
    pub fn set_week_offset(&mut self, offset: i32) -> bool {
        match WeekWindow::new(self.today, offset) {
            Some(window) => {
                self.window = window;
                true
            }
            None => {
                warn!(offset, "week offset out of range");
                false
            }
        }
    }

    /// Names in the cell at `day_index` of the visible week.
    pub fn occupants(&self, day_index: usize, timeslot: &TimeSlot) -> Vec<String> {
        match self.window.date_at(day_index) {
            Some(date) => self.book.occupants(SlotDate::from(date), timeslot),
            None => Vec::new(),
        }
    }

    /// Occupants of every cell in the visible week, row by row.
    pub fn grid(&self) -> Vec<(TimeSlot, [Vec<String>; DAYS_PER_WEEK])> {
        let dates = self.window.slot_dates();
        TimeSlot::all()
            .into_iter()
            .map(|slot| {
                let row = dates.map(|d| self.book.occupants(d, &slot));
                (slot, row)
            })
            .collect()
    }

    /// Whether the active volunteer holds the cell.
    pub fn cell_state(&self, day_index: usize, timeslot: &TimeSlot) -> SlotState {
        let (Some(active), Some(date)) = (self.identity.active(), self.window.date_at(day_index)) else {
            return SlotState::Empty;
        };
        let key = ClaimKey::new(active.id, SlotDate::from(date), timeslot.clone());
        self.book.state_of(&key)
    }

    pub fn active_volunteers(&self) -> Vec<VolunteerCard> {
        self.book.active_volunteers(&self.window)
    }

    pub fn stats(&self, name: &str) -> VolunteerStats {
        self.book.stats(name, &self.window)
    }

    pub fn set_first_name(&mut self, input: &str) {
        self.identity.set_first_name(input);
    }

    pub fn set_last_name(&mut self, input: &str) {
        self.identity.set_last_name(input);
    }

    pub async fn find_volunteer(&mut self) -> Notice {
        self.identity.find(&self.api).await
    }

    pub async fn register_volunteer(&mut self) -> Notice {
        self.identity.register(&self.api).await
    }

    pub fn select_registered(&mut self, volunteer: &Volunteer) -> Notice {
        self.identity.select_registered(volunteer)
    }

    pub fn active(&self) -> Option<&ActiveVolunteer> {
        self.identity.active()
    }

    pub fn identity_status(&self) -> &IdentityStatus {
        self.identity.status()
    }
}
