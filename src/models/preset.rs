//! Event preset model

use serde::{Deserialize, Serialize};

/// One claimable role slot within a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSlot {
    pub name: String,
    pub capacity: u32,
}

/// A themed event template: title, description and an ordered role roster.
/// `statuses` are optional capacity-less pseudo-roles ("Maybe" / "Decline"
/// style) rendered after the real roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePreset {
    pub key: String,
    pub title: String,
    pub description: String,
    pub roles: Vec<RoleSlot>,
    #[serde(default)]
    pub statuses: Vec<String>,
}

impl RolePreset {
    /// Look up a role slot by name
    pub fn role(&self, name: &str) -> Option<&RoleSlot> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Whether `name` is one of the preset's status pseudo-roles
    pub fn is_status(&self, name: &str) -> bool {
        self.statuses.iter().any(|s| s == name)
    }

    /// All roster keys in display order: roles first, then statuses
    pub fn roster_keys(&self) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .map(|r| r.name.as_str())
            .chain(self.statuses.iter().map(|s| s.as_str()))
    }
}
