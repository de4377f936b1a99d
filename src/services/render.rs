//! Roster display rendering
//!
//! Pure view construction: turns the active event's preset, roster and
//! metadata into the announcement text. No Telegram calls and no errors;
//! any roster state that exists renders to something.

use crate::models::event::EventMeta;
use crate::models::preset::RolePreset;
use crate::models::roster::{Participant, Roster};
use crate::utils::helpers::mention;

/// Placeholder for an empty role line
const EMPTY_SLOT: &str = "nobody";

/// Rendered roster, ready to post. `roles` and `statuses` carry the
/// display-ordered claim keys so the transport layer can rebuild the
/// sign-up keyboard alongside the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    pub title: String,
    pub description: String,
    pub meta: EventMeta,
    pub lines: Vec<String>,
    pub roles: Vec<String>,
    pub statuses: Vec<String>,
}

impl RosterView {
    /// Assemble the full announcement message (legacy Markdown)
    pub fn text(&self) -> String {
        let mut out = format!("*{}*\n{}\n\n", self.title, self.description);
        out.push_str(&format!(
            "📅 {}  ⏰ {}  📍 {}\n\n",
            self.meta.date, self.meta.time, self.meta.location
        ));
        out.push_str(&self.lines.join("\n"));
        out
    }
}

/// Render the roster state into a view
pub fn render_roster(preset: &RolePreset, roster: &Roster, meta: &EventMeta) -> RosterView {
    let mut lines = Vec::with_capacity(preset.roles.len() + preset.statuses.len());

    for slot in &preset.roles {
        let members = roster.members(&slot.name);
        lines.push(format!(
            "{} ({}/{}): {}",
            slot.name,
            members.len(),
            slot.capacity,
            join_members(members)
        ));
    }

    // Status pseudo-roles follow the roles, without a capacity suffix
    for status in &preset.statuses {
        let members = roster.members(status);
        lines.push(format!("{}: {}", status, join_members(members)));
    }

    RosterView {
        title: preset.title.clone(),
        description: preset.description.clone(),
        meta: meta.clone(),
        lines,
        roles: preset.roles.iter().map(|r| r.name.clone()).collect(),
        statuses: preset.statuses.clone(),
    }
}

fn join_members(members: &[Participant]) -> String {
    if members.is_empty() {
        EMPTY_SLOT.to_string()
    } else {
        members
            .iter()
            .map(|p| mention(p.user_id, &p.display_name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
