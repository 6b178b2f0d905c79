use serde::Serialize;
use shiftboard_core::types::{capitalize, display_name, normalize_name, Volunteer, VolunteerId};
use shiftboard_protocol::NewVolunteer;
use tracing::{info, warn};

use crate::api::ScheduleApi;
use crate::error::ApiError;
use crate::notice::Notice;

/// The volunteer whose clicks are being recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveVolunteer {
    pub id: VolunteerId,
    pub display_name: String,
    pub role: String,
}

impl From<&Volunteer> for ActiveVolunteer {
    fn from(v: &Volunteer) -> Self {
        Self {
            id: v.id,
            display_name: v.display_name(),
            role: v.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityStatus {
    /// Nothing confirmed for the names currently typed.
    #[default]
    Unresolved,
    Resolved(ActiveVolunteer),
    /// The lookup found no record; one-click registration is offered.
    Unregistered,
}

/// Maps the typed first/last name onto a volunteer record.
///
/// Editing either name drops the resolved identity, so slot clicks are never
/// attributed to a name the user has since changed.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    first_name: String,
    last_name: String,
    status: IdentityStatus,
    default_role: String,
    directory: Vec<Volunteer>,
}

impl IdentityResolver {
    pub fn new(default_role: impl Into<String>) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            status: IdentityStatus::Unresolved,
            default_role: default_role.into(),
            directory: Vec::new(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_first_name(&mut self, input: &str) {
        self.first_name = input.to_string();
        self.status = IdentityStatus::Unresolved;
    }

    pub fn set_last_name(&mut self, input: &str) {
        self.last_name = input.to_string();
        self.status = IdentityStatus::Unresolved;
    }

    pub fn status(&self) -> &IdentityStatus {
        &self.status
    }

    pub fn active(&self) -> Option<&ActiveVolunteer> {
        match &self.status {
            IdentityStatus::Resolved(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.status, IdentityStatus::Resolved(_))
    }

    /// True when the last lookup came back empty and registration is offered.
    pub fn needs_registration(&self) -> bool {
        self.status == IdentityStatus::Unregistered
    }

    /// Both names typed, and they differ from the identity already resolved.
    pub fn can_search(&self) -> bool {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return false;
        }
        match self.active() {
            Some(active) => {
                active.display_name.to_lowercase() != self.typed_display_name().to_lowercase()
            }
            None => true,
        }
    }

    /// Registered volunteers, as last loaded by [`Self::load_directory`].
    pub fn directory(&self) -> &[Volunteer] {
        &self.directory
    }

    fn typed_display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    /// Look up the typed name and update the status.
    pub async fn find<A: ScheduleApi + ?Sized>(&mut self, api: &A) -> Notice {
        let first = normalize_name(&self.first_name);
        let last = normalize_name(&self.last_name);
        if first.is_empty() || last.is_empty() {
            self.status = IdentityStatus::Unresolved;
            return Notice::error("Enter both a first and a last name.");
        }
        let name = self.typed_display_name();

        let found = match api.find_volunteers(&first, &last).await {
            Ok(list) => list.into_iter().next(),
            Err(ApiError::NotFound(_)) => None,
            Err(e) => {
                warn!(error = %e, %first, %last, "volunteer lookup failed");
                self.status = IdentityStatus::Unregistered;
                return Notice::error(format!("Could not look up {name}: {e}"));
            }
        };

        match found {
            Some(volunteer) => {
                info!(volunteer_id = %volunteer.id, "volunteer resolved");
                self.status = IdentityStatus::Resolved(ActiveVolunteer::from(&volunteer));
                Notice::success(format!("Selecting slots now for {name}!"))
            }
            None => {
                info!(%first, %last, "volunteer not registered");
                self.status = IdentityStatus::Unregistered;
                Notice::error(format!(
                    "{name} is not in the system! Click on the 'Not Registered' badge to register them immediately!"
                ))
            }
        }
    }

    /// Create a record for the typed name with the default role, then resolve it.
    pub async fn register<A: ScheduleApi + ?Sized>(&mut self, api: &A) -> Notice {
        let req = NewVolunteer::new(&self.first_name, &self.last_name, &self.default_role);
        if let Err(e) = req.validate() {
            return Notice::error(e.to_string());
        }

        match api.register_volunteer(&req).await {
            Ok(volunteer) => {
                info!(volunteer_id = %volunteer.id, role = %volunteer.role, "volunteer registered");
                self.directory.push(volunteer);
                self.find(api).await
            }
            Err(e) => {
                warn!(error = %e, "volunteer registration failed");
                self.status = IdentityStatus::Unregistered;
                Notice::error(format!(
                    "Failed to register {}: {e}",
                    self.typed_display_name()
                ))
            }
        }
    }

    /// Pick a volunteer from the directory. The record already carries id and
    /// role, so no lookup is needed.
    pub fn select_registered(&mut self, volunteer: &Volunteer) -> Notice {
        let active = ActiveVolunteer::from(volunteer);
        self.first_name = capitalize(&volunteer.first_name);
        self.last_name = capitalize(&volunteer.last_name);
        let notice = Notice::success(format!("Selecting slots now for {}!", active.display_name));
        self.status = IdentityStatus::Resolved(active);
        notice
    }

    /// Refresh the volunteer directory. `None` on success.
    pub async fn load_directory<A: ScheduleApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        match api.list_volunteers().await {
            Ok(list) => {
                self.directory = list;
                None
            }
            Err(e) => {
                warn!(error = %e, "volunteer directory load failed");
                Some(Notice::error(format!("Could not load registered volunteers: {e}")))
            }
        }
    }
}
