//! Conversation context management
//!
//! Tracks where a user is in a multi-step conversation (scenario + step)
//! and the answers collected so far.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use crate::utils::errors::{RaidBuddyError, Result};

/// User conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// User ID this context belongs to
    pub user_id: i64,
    /// Current scenario the user is in
    pub scenario: Option<String>,
    /// Current step within the scenario
    pub step: Option<String>,
    /// Scenario-specific data
    pub data: HashMap<String, serde_json::Value>,
    /// When this context expires (for cleanup)
    pub expires_at: Option<DateTime<Utc>>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a new conversation context for a user
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            scenario: None,
            step: None,
            data: HashMap::new(),
            expires_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Start a new scenario
    pub fn start_scenario(&mut self, scenario: &str, initial_step: &str) {
        self.scenario = Some(scenario.to_string());
        self.step = Some(initial_step.to_string());
        self.data.clear();
        self.updated_at = Utc::now();
        self.expires_at = Some(Utc::now() + Duration::hours(24));
    }

    /// Move to the next step in the current scenario
    pub fn next_step(&mut self, step: &str) -> Result<()> {
        if self.scenario.is_none() {
            return Err(RaidBuddyError::InvalidStateTransition {
                from: "no_scenario".to_string(),
                to: step.to_string(),
            });
        }

        self.step = Some(step.to_string());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Complete the current scenario and clear context
    pub fn complete_scenario(&mut self) {
        self.scenario = None;
        self.step = None;
        self.data.clear();
        self.expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Set data for the current context
    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key.to_string(), json_value);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Get string data
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.data
            .get(key)
            .and_then(|value| value.as_str().map(|s| s.to_string()))
    }

    /// Check if context has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            Utc::now() > expires_at
        } else {
            false
        }
    }

    /// Set custom expiry time
    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Check if user is in a specific scenario and step
    pub fn is_at(&self, scenario: &str, step: &str) -> bool {
        self.scenario.as_deref() == Some(scenario) && self.step.as_deref() == Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context() {
        let context = ConversationContext::new(123);
        assert_eq!(context.user_id, 123);
        assert!(context.scenario.is_none());
        assert!(context.step.is_none());
        assert!(context.data.is_empty());
        assert!(context.expires_at.is_none());
    }

    #[test]
    fn test_start_scenario() {
        let mut context = ConversationContext::new(123);
        context.start_scenario("event_creation", "date_input");

        assert!(context.is_at("event_creation", "date_input"));
        assert!(context.expires_at.is_some());
    }

    #[test]
    fn test_next_step_requires_scenario() {
        let mut context = ConversationContext::new(123);
        assert!(context.next_step("time_input").is_err());

        context.start_scenario("event_creation", "date_input");
        context.next_step("time_input").unwrap();
        assert!(context.is_at("event_creation", "time_input"));
    }

    #[test]
    fn test_data_operations() {
        let mut context = ConversationContext::new(123);
        context.set_data("preset", "zvz").unwrap();

        assert_eq!(context.get_string("preset"), Some("zvz".to_string()));
        assert_eq!(context.get_string("missing"), None);
    }

    #[test]
    fn test_complete_clears_everything() {
        let mut context = ConversationContext::new(123);
        context.start_scenario("event_creation", "date_input");
        context.set_data("preset", "zvz").unwrap();

        context.complete_scenario();
        assert!(context.scenario.is_none());
        assert!(context.data.is_empty());
        assert!(context.expires_at.is_none());
    }

    #[test]
    fn test_expiry() {
        let mut context = ConversationContext::new(123);

        context.set_expiry(Utc::now() - Duration::hours(1));
        assert!(context.is_expired());

        context.set_expiry(Utc::now() + Duration::hours(1));
        assert!(!context.is_expired());
    }
}
