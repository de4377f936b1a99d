//! Event lifecycle service
//!
//! Owns the single active event. Every mutation (create, claim, release,
//! expiry sweep) runs under one async mutex, so the remove-then-insert
//! claim sequence and the expiry check never interleave. History writes
//! are best-effort: failures are logged and never block the in-memory
//! transition.

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::EventsConfig;
use crate::database::EventRepository;
use crate::models::event::{ActiveEvent, EventMeta};
use crate::models::roster::Participant;
use crate::presets::PresetCatalog;
use crate::services::render::{render_roster, RosterView};
use crate::utils::errors::{RaidBuddyError, Result};

/// Lifecycle controller for the single active event
#[derive(Clone)]
pub struct EventService {
    catalog: Arc<PresetCatalog>,
    events: EventRepository,
    lifetime: Duration,
    active: Arc<Mutex<Option<ActiveEvent>>>,
}

impl EventService {
    pub fn new(catalog: Arc<PresetCatalog>, events: EventRepository, config: &EventsConfig) -> Self {
        Self {
            catalog,
            events,
            lifetime: Duration::seconds(config.lifetime_seconds as i64),
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a new active event from a preset. Replaces any prior active
    /// event without ceremony: the old one was persisted at its own
    /// creation, and last writer wins.
    pub async fn create(&self, preset_key: &str, meta: EventMeta, created_by: i64) -> Result<RosterView> {
        let preset = self
            .catalog
            .get(preset_key)
            .cloned()
            .ok_or_else(|| RaidBuddyError::UnknownPresetType { key: preset_key.to_string() })?;

        let mut active = self.active.lock().await;

        let event = ActiveEvent::new(preset, meta, created_by, Utc::now(), self.lifetime);
        if let Err(e) = self
            .events
            .record_created(event.type_key(), created_by, event.created_at.timestamp_millis())
            .await
        {
            warn!(error = %e, event_type = event.type_key(), "Failed to record created event");
        }

        if let Some(previous) = active.as_ref() {
            info!(
                previous_type = previous.type_key(),
                event_type = event.type_key(),
                "Replacing active event"
            );
        }

        let view = render_roster(&event.preset, &event.roster, &event.meta);
        info!(
            event_type = event.type_key(),
            created_by = created_by,
            expires_at = %event.expires_at,
            "Event created"
        );
        *active = Some(event);

        Ok(view)
    }

    /// Sign a user up for a role of the active event
    pub async fn claim(&self, user_id: i64, display_name: &str, role_name: &str) -> Result<RosterView> {
        let mut active = self.active.lock().await;
        let event = active.as_mut().ok_or(RaidBuddyError::NoActiveEvent)?;

        let participant = Participant { user_id, display_name: display_name.to_string() };
        event.claim(participant, role_name)?;

        debug!(user_id = user_id, role = role_name, "Role claimed");
        Ok(render_roster(&event.preset, &event.roster, &event.meta))
    }

    /// Remove a user from whatever role they hold. The boolean reports
    /// whether anything was removed.
    pub async fn release(&self, user_id: i64) -> Result<(RosterView, bool)> {
        let mut active = self.active.lock().await;
        let event = active.as_mut().ok_or(RaidBuddyError::NoActiveEvent)?;

        let removed = event.release(user_id);
        debug!(user_id = user_id, removed = removed, "Release processed");
        Ok((render_roster(&event.preset, &event.roster, &event.meta), removed))
    }

    /// Current roster view and expiry deadline, if an event is active
    pub async fn current(&self) -> Option<(RosterView, DateTime<Utc>)> {
        let active = self.active.lock().await;
        active
            .as_ref()
            .map(|event| (render_roster(&event.preset, &event.roster, &event.meta), event.expires_at))
    }

    /// Expiry check, driven by the background poller. Archives and clears
    /// the active event once `now` has passed its deadline; returns
    /// whether an archival happened.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<bool> {
        let mut active = self.active.lock().await;

        let event = match active.take() {
            Some(event) if event.is_expired(now) => event,
            other => {
                *active = other;
                return Ok(false);
            }
        };
        let snapshot = event.roster.snapshot_json().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to serialize roster snapshot");
            "{}".to_string()
        });

        if let Err(e) = self
            .events
            .record_archived(
                event.type_key(),
                event.created_at.timestamp_millis(),
                now.timestamp_millis(),
                &snapshot,
            )
            .await
        {
            warn!(error = %e, event_type = event.type_key(), "Failed to record archived event");
        }

        info!(
            event_type = event.type_key(),
            claims = event.roster.total_claims(),
            "Event expired and archived"
        );

        Ok(true)
    }
}
