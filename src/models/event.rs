//! Active event model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::models::preset::RolePreset;
use crate::models::roster::{Participant, Roster};
use crate::utils::errors::Result;

/// Free-text event details collected at creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    pub date: String,
    pub time: String,
    pub location: String,
}

/// The single live event aggregate. At most one exists process-wide;
/// creating a new event replaces it and expiry clears it.
#[derive(Debug, Clone)]
pub struct ActiveEvent {
    pub preset: RolePreset,
    pub roster: Roster,
    pub meta: EventMeta,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ActiveEvent {
    /// Build a fresh event with an empty roster. The expiry deadline is a
    /// fixed offset from creation and is never extended by activity.
    pub fn new(
        preset: RolePreset,
        meta: EventMeta,
        created_by: i64,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let roster = Roster::for_preset(&preset);
        Self {
            preset,
            roster,
            meta,
            created_by,
            created_at: now,
            expires_at: now + lifetime,
        }
    }

    /// The preset key, used as the persisted event type
    pub fn type_key(&self) -> &str {
        &self.preset.key
    }

    pub fn claim(&mut self, participant: Participant, role_name: &str) -> Result<()> {
        self.roster.claim(&self.preset, participant, role_name)
    }

    pub fn release(&mut self, user_id: i64) -> bool {
        self.roster.release(user_id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
