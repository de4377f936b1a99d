//! Registration roster model
//!
//! The in-memory sign-up state of the active event: for every role (and
//! status pseudo-role) of the preset, an ordered list of claimants. All
//! capacity and one-role-per-user rules live here.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::models::preset::RolePreset;
use crate::utils::errors::{RaidBuddyError, Result};

/// A user signed up for a role. `display_name` is captured once, at claim
/// time. Serialized field names match the archived rows written by earlier
/// versions of the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "id")]
    pub user_id: i64,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// Role name -> ordered claimants (oldest first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    slots: HashMap<String, Vec<Participant>>,
}

impl Roster {
    /// Create an empty roster with one list per preset role and status
    pub fn for_preset(preset: &RolePreset) -> Self {
        let slots = preset
            .roster_keys()
            .map(|key| (key.to_string(), Vec::new()))
            .collect();
        Self { slots }
    }

    /// Sign a user up for a role. The user is removed from every list
    /// first, so switching roles evicts the prior claim; if the target
    /// role then turns out to be full or unknown, the removal stands and
    /// the user ends up registered nowhere.
    pub fn claim(&mut self, preset: &RolePreset, participant: Participant, role_name: &str) -> Result<()> {
        self.release(participant.user_id);

        if let Some(slot) = preset.role(role_name) {
            let list = self.slots.entry(role_name.to_string()).or_default();
            if list.len() >= slot.capacity as usize {
                return Err(RaidBuddyError::RoleFull { role: role_name.to_string() });
            }
            list.push(participant);
            Ok(())
        } else if preset.is_status(role_name) {
            // Status pseudo-roles have no capacity bound
            self.slots.entry(role_name.to_string()).or_default().push(participant);
            Ok(())
        } else {
            Err(RaidBuddyError::UnknownRole { role: role_name.to_string() })
        }
    }

    /// Remove a user from every list. Returns whether anything was removed.
    pub fn release(&mut self, user_id: i64) -> bool {
        let mut removed = false;
        for list in self.slots.values_mut() {
            let before = list.len();
            list.retain(|p| p.user_id != user_id);
            removed |= list.len() != before;
        }
        removed
    }

    /// Claimants of a role, in claim order. Unknown keys read as empty.
    pub fn members(&self, role_name: &str) -> &[Participant] {
        self.slots.get(role_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The role the user currently holds, if any
    pub fn role_of(&self, user_id: i64) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, list)| list.iter().any(|p| p.user_id == user_id))
            .map(|(role, _)| role.as_str())
    }

    /// Total number of claims across all lists
    pub fn total_claims(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Frozen serialized registrations for archival
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.slots)?)
    }
}
