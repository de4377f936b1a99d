//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod render;

// Re-export commonly used services
pub use event::EventService;
pub use render::{render_roster, RosterView};

use std::sync::Arc;
use crate::config::Settings;
use crate::database::EventRepository;
use crate::presets::PresetCatalog;

/// Service factory bundling the services handlers depend on
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub catalog: Arc<PresetCatalog>,
    pub settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, catalog: Arc<PresetCatalog>, events: EventRepository) -> Self {
        let event_service = EventService::new(catalog.clone(), events, &settings.events);

        Self {
            event_service,
            catalog,
            settings,
        }
    }
}
