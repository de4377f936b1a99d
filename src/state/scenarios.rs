//! Conversation scenarios implementation
//!
//! Defines the multi-step conversations users can go through. The only
//! scenario today is event creation: three free-text answers (date, time,
//! location) collected after a preset has been picked.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{RaidBuddyError, Result};
use super::context::ConversationContext;

/// Represents a conversation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier
    pub id: String,
    /// Initial step when starting this scenario
    pub initial_step: String,
    /// All possible steps in this scenario
    pub steps: HashMap<String, ScenarioStep>,
}

/// Represents a step within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Step identifier
    pub id: String,
    /// Question shown to the user when this step begins
    pub prompt: String,
    /// Possible next steps from this step
    pub next_steps: Vec<String>,
    /// Validation rules for user input
    pub validation: Option<StepValidation>,
}

/// Validation rules for a scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepValidation {
    /// Minimum length
    pub min_length: Option<usize>,
    /// Maximum length
    pub max_length: Option<usize>,
    /// Pattern to match (regex)
    pub pattern: Option<String>,
    /// Custom validation message
    pub error_message: Option<String>,
}

/// Scenario manager for handling all conversation scenarios
#[derive(Debug, Clone)]
pub struct ScenarioManager {
    scenarios: HashMap<String, Scenario>,
}

impl ScenarioManager {
    /// Create a new scenario manager with default scenarios
    pub fn new() -> Self {
        let mut manager = Self {
            scenarios: HashMap::new(),
        };

        manager.register_scenario(create_event_creation_scenario());
        manager
    }

    /// Register a new scenario
    pub fn register_scenario(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.id.clone(), scenario);
    }

    /// Get a scenario by ID
    pub fn get_scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Start a scenario for a user
    pub fn start_scenario(&self, context: &mut ConversationContext, scenario_id: &str) -> Result<()> {
        let scenario = self.get_scenario(scenario_id)
            .ok_or_else(|| RaidBuddyError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        context.start_scenario(scenario_id, &scenario.initial_step);
        Ok(())
    }

    /// Move to the next step in a scenario
    pub fn next_step(&self, context: &mut ConversationContext, next_step: &str) -> Result<()> {
        let scenario_id = context.scenario.as_ref()
            .ok_or_else(|| RaidBuddyError::InvalidStateTransition {
                from: "no_scenario".to_string(),
                to: next_step.to_string(),
            })?;

        let scenario = self.get_scenario(scenario_id)
            .ok_or_else(|| RaidBuddyError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        let current_step_id = context.step.as_ref()
            .ok_or_else(|| RaidBuddyError::InvalidStateTransition {
                from: "no_step".to_string(),
                to: next_step.to_string(),
            })?;

        let current_step = scenario.steps.get(current_step_id)
            .ok_or_else(|| RaidBuddyError::InvalidInput(format!("Unknown step: {}", current_step_id)))?;

        if !current_step.next_steps.contains(&next_step.to_string()) {
            return Err(RaidBuddyError::InvalidStateTransition {
                from: current_step_id.clone(),
                to: next_step.to_string(),
            });
        }

        if !scenario.steps.contains_key(next_step) {
            return Err(RaidBuddyError::InvalidInput(format!("Unknown step: {}", next_step)));
        }

        context.next_step(next_step)?;
        Ok(())
    }

    /// The prompt text for the step the user is currently at
    pub fn prompt_for(&self, context: &ConversationContext) -> Option<&str> {
        let scenario = self.get_scenario(context.scenario.as_deref()?)?;
        let step = scenario.steps.get(context.step.as_deref()?)?;
        Some(&step.prompt)
    }

    /// Validate user input for the current step
    pub fn validate_input(&self, context: &ConversationContext, input: &str) -> Result<()> {
        let scenario_id = context.scenario.as_ref()
            .ok_or_else(|| RaidBuddyError::InvalidInput("No active scenario".to_string()))?;

        let step_id = context.step.as_ref()
            .ok_or_else(|| RaidBuddyError::InvalidInput("No active step".to_string()))?;

        let scenario = self.get_scenario(scenario_id)
            .ok_or_else(|| RaidBuddyError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        let step = scenario.steps.get(step_id)
            .ok_or_else(|| RaidBuddyError::InvalidInput(format!("Unknown step: {}", step_id)))?;

        if let Some(validation) = &step.validation {
            validate_against_rules(input, validation)?;
        }

        Ok(())
    }
}

impl Default for ScenarioManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate input against validation rules
fn validate_against_rules(input: &str, validation: &StepValidation) -> Result<()> {
    if let Some(min_length) = validation.min_length {
        if input.len() < min_length {
            return Err(RaidBuddyError::InvalidInput(
                validation.error_message.clone()
                    .unwrap_or_else(|| format!("Input too short (minimum {} characters)", min_length))
            ));
        }
    }

    if let Some(max_length) = validation.max_length {
        if input.len() > max_length {
            return Err(RaidBuddyError::InvalidInput(
                validation.error_message.clone()
                    .unwrap_or_else(|| format!("Input too long (maximum {} characters)", max_length))
            ));
        }
    }

    if let Some(pattern) = &validation.pattern {
        let regex = regex::Regex::new(pattern)
            .map_err(|_| RaidBuddyError::Config("Invalid regex pattern".to_string()))?;

        if !regex.is_match(input) {
            return Err(RaidBuddyError::InvalidInput(
                validation.error_message.clone()
                    .unwrap_or_else(|| "Input format is invalid".to_string())
            ));
        }
    }

    Ok(())
}

/// Scenario: collect the free-text details of a new event
fn create_event_creation_scenario() -> Scenario {
    let mut steps = HashMap::new();

    let free_text = |message: &str| StepValidation {
        min_length: Some(1),
        max_length: Some(100),
        pattern: None,
        error_message: Some(message.to_string()),
    };

    steps.insert("date_input".to_string(), ScenarioStep {
        id: "date_input".to_string(),
        prompt: "📅 Event date? (e.g. 20 June 2025)".to_string(),
        next_steps: vec!["time_input".to_string()],
        validation: Some(free_text("Please send the event date as text (max 100 characters).")),
    });

    steps.insert("time_input".to_string(), ScenarioStep {
        id: "time_input".to_string(),
        prompt: "⏰ Start time? (e.g. 20:00 UTC)".to_string(),
        next_steps: vec!["location_input".to_string()],
        validation: Some(free_text("Please send the start time as text (max 100 characters).")),
    });

    steps.insert("location_input".to_string(), ScenarioStep {
        id: "location_input".to_string(),
        prompt: "📍 Muster location?".to_string(),
        next_steps: vec![],
        validation: Some(free_text("Please send the muster location as text (max 100 characters).")),
    });

    Scenario {
        id: "event_creation".to_string(),
        initial_step: "date_input".to_string(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_event_creation_scenario_walk() {
        let manager = ScenarioManager::new();
        let mut context = ConversationContext::new(1);

        manager.start_scenario(&mut context, "event_creation").unwrap();
        assert!(context.is_at("event_creation", "date_input"));

        manager.next_step(&mut context, "time_input").unwrap();
        manager.next_step(&mut context, "location_input").unwrap();
        assert!(context.is_at("event_creation", "location_input"));
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let manager = ScenarioManager::new();
        let mut context = ConversationContext::new(1);
        manager.start_scenario(&mut context, "event_creation").unwrap();

        let err = manager.next_step(&mut context, "location_input").unwrap_err();
        assert_matches!(err, RaidBuddyError::InvalidStateTransition { .. });
        assert!(context.is_at("event_creation", "date_input"));
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        let manager = ScenarioManager::new();
        let mut context = ConversationContext::new(1);
        assert!(manager.start_scenario(&mut context, "onboarding").is_err());
    }

    #[test]
    fn test_input_validation() {
        let manager = ScenarioManager::new();
        let mut context = ConversationContext::new(1);
        manager.start_scenario(&mut context, "event_creation").unwrap();

        assert!(manager.validate_input(&context, "20 June 2025").is_ok());
        assert!(manager.validate_input(&context, "").is_err());
        assert!(manager.validate_input(&context, &"x".repeat(200)).is_err());
    }

    #[test]
    fn test_prompts_exist_for_every_step() {
        let manager = ScenarioManager::new();
        let mut context = ConversationContext::new(1);
        manager.start_scenario(&mut context, "event_creation").unwrap();

        assert!(manager.prompt_for(&context).unwrap().contains("date"));
        manager.next_step(&mut context, "time_input").unwrap();
        assert!(manager.prompt_for(&context).unwrap().contains("time"));
    }
}
