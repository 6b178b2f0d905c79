//! Client-side claim state: what the server has confirmed and what the user
//! has staged but not yet synced.

use std::collections::BTreeMap;

use serde::Serialize;
use shiftboard_core::types::{ClaimKey, SlotDate, TimeSlot, TimeslotRecord, SLOT_HOURS};
use tracing::debug;

use crate::identity::ActiveVolunteer;
use crate::week::WeekWindow;

/// A claim plus the display fields the grid shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claim {
    pub key: ClaimKey,
    pub v_name: String,
    pub role: String,
}

impl From<TimeslotRecord> for Claim {
    fn from(rec: TimeslotRecord) -> Self {
        Self {
            key: rec.key(),
            v_name: rec.v_name,
            role: rec.role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Pending,
    Confirmed,
}

/// Outcome of a grid click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEffect {
    /// No volunteer selected; nothing changed.
    Ignored,
    Staged(ClaimKey),
    Unstaged(ClaimKey),
    /// A confirmed claim was dropped locally. The caller owes the server a delete.
    Released(Claim),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolunteerCard {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VolunteerStats {
    pub shifts: u32,
    pub hours: u32,
}

/// Confirmed and pending claims, keyed by [`ClaimKey`].
///
/// A key lives in at most one of the two maps. Everything the grid shows
/// (occupants, cards, stats) is derived from these two maps on read.
#[derive(Debug, Clone, Default)]
pub struct SlotBook {
    confirmed: BTreeMap<ClaimKey, Claim>,
    pending: BTreeMap<ClaimKey, Claim>,
}

impl SlotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the active volunteer's claim on one slot.
    pub fn click(
        &mut self,
        active: Option<&ActiveVolunteer>,
        date: SlotDate,
        timeslot: &TimeSlot,
    ) -> ClickEffect {
        let Some(active) = active else {
            return ClickEffect::Ignored;
        };
        let key = ClaimKey::new(active.id, date, timeslot.clone());

        if self.pending.remove(&key).is_some() {
            debug!(%key, "claim unstaged");
            return ClickEffect::Unstaged(key);
        }
        if let Some(claim) = self.confirmed.remove(&key) {
            debug!(%key, "claim released");
            return ClickEffect::Released(claim);
        }

        debug!(%key, "claim staged");
        self.pending.insert(
            key.clone(),
            Claim {
                key: key.clone(),
                v_name: active.display_name.clone(),
                role: active.role.clone(),
            },
        );
        ClickEffect::Staged(key)
    }

    pub fn state_of(&self, key: &ClaimKey) -> SlotState {
        if self.pending.contains_key(key) {
            SlotState::Pending
        } else if self.confirmed.contains_key(key) {
            SlotState::Confirmed
        } else {
            SlotState::Empty
        }
    }

    /// Names shown in one grid cell: confirmed first, then pending, each name once.
    pub fn occupants(&self, date: SlotDate, timeslot: &TimeSlot) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let in_cell = |c: &&Claim| c.key.date == date && &c.key.timeslot == timeslot;
        for claim in self
            .confirmed
            .values()
            .filter(in_cell)
            .chain(self.pending.values().filter(in_cell))
        {
            if !names.contains(&claim.v_name) {
                names.push(claim.v_name.clone());
            }
        }
        names
    }

    /// Move a synced claim from pending to confirmed, taking the server's record.
    pub fn promote(&mut self, key: &ClaimKey, record: TimeslotRecord) {
        self.pending.remove(key);
        let claim = Claim::from(record);
        self.confirmed.insert(claim.key.clone(), claim);
    }

    /// Replace the confirmed set with a fresh server listing. Pending claims
    /// that the server already holds are dropped.
    pub fn replace_confirmed(&mut self, records: Vec<TimeslotRecord>) {
        self.confirmed = records
            .into_iter()
            .map(Claim::from)
            .map(|c| (c.key.clone(), c))
            .collect();
        let confirmed = &self.confirmed;
        self.pending.retain(|key, _| !confirmed.contains_key(key));
    }

    /// Distinct volunteers with a confirmed claim in `window`, in date then
    /// timeslot order of their first claim.
    pub fn active_volunteers(&self, window: &WeekWindow) -> Vec<VolunteerCard> {
        let mut in_window: Vec<&Claim> = self
            .confirmed
            .values()
            .filter(|c| window.contains(c.key.date.as_naive()))
            .collect();
        in_window.sort_by(|a, b| {
            (a.key.date, &a.key.timeslot).cmp(&(b.key.date, &b.key.timeslot))
        });

        let mut cards: Vec<VolunteerCard> = Vec::new();
        for claim in in_window {
            if !cards
                .iter()
                .any(|c| c.name == claim.v_name && c.role == claim.role)
            {
                cards.push(VolunteerCard {
                    name: claim.v_name.clone(),
                    role: claim.role.clone(),
                });
            }
        }
        cards
    }

    /// Confirmed shifts for `name` (case-insensitive) inside `window`.
    pub fn stats(&self, name: &str, window: &WeekWindow) -> VolunteerStats {
        let wanted = name.trim().to_lowercase();
        let shifts = self
            .confirmed
            .values()
            .filter(|c| window.contains(c.key.date.as_naive()))
            .filter(|c| c.v_name.to_lowercase() == wanted)
            .count() as u32;
        VolunteerStats {
            shifts,
            hours: shifts * SLOT_HOURS,
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &Claim> {
        self.pending.values()
    }

    pub fn confirmed(&self) -> impl Iterator<Item = &Claim> {
        self.confirmed.values()
    }

    pub fn pending_keys(&self) -> Vec<ClaimKey> {
        self.pending.keys().cloned().collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn confirmed_len(&self) -> usize {
        self.confirmed.len()
    }

    /// Unsynced changes exist.
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }
}
