//! Preset catalog loader
//!
//! Provides the built-in event presets and optional loading of a custom
//! preset catalog from a TOML file, with validation of the loaded data.

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};
use crate::models::preset::{RolePreset, RoleSlot};
use crate::utils::errors::{RaidBuddyError, Result};

/// The catalog of event presets, fixed after startup
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<RolePreset>,
}

/// TOML shape of a preset catalog file
#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(rename = "preset")]
    presets: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
struct PresetEntry {
    key: String,
    title: String,
    description: String,
    roles: Vec<RoleEntry>,
    #[serde(default)]
    statuses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RoleEntry {
    name: String,
    capacity: u32,
}

impl PresetCatalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Self { presets: builtin_presets() }
    }

    /// Load the catalog: the file at `path` when configured, the built-in
    /// presets otherwise.
    pub async fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).await.map_err(|e| {
                    RaidBuddyError::Config(format!("Failed to read preset file {}: {}", path, e))
                })?;
                let catalog = Self::parse(&content)?;
                info!(path = path, presets = catalog.presets.len(), "Loaded preset catalog");
                Ok(catalog)
            }
            None => {
                let catalog = Self::builtin();
                debug!(presets = catalog.presets.len(), "Using built-in preset catalog");
                Ok(catalog)
            }
        }
    }

    /// Parse and validate a TOML catalog
    pub fn parse(content: &str) -> Result<Self> {
        let file: PresetFile = toml::from_str(content)
            .map_err(|e| RaidBuddyError::Config(format!("Invalid preset file: {}", e)))?;

        let presets: Vec<RolePreset> = file
            .presets
            .into_iter()
            .map(|entry| RolePreset {
                key: entry.key,
                title: entry.title,
                description: entry.description,
                roles: entry
                    .roles
                    .into_iter()
                    .map(|r| RoleSlot { name: r.name, capacity: r.capacity })
                    .collect(),
                statuses: entry.statuses,
            })
            .collect();

        let catalog = Self { presets };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Look up a preset by key
    pub fn get(&self, key: &str) -> Option<&RolePreset> {
        self.presets.iter().find(|p| p.key == key)
    }

    /// All presets, in catalog order
    pub fn all(&self) -> &[RolePreset] {
        &self.presets
    }

    fn validate(&self) -> Result<()> {
        if self.presets.is_empty() {
            return Err(RaidBuddyError::Config("Preset catalog is empty".to_string()));
        }

        for preset in &self.presets {
            if self.presets.iter().filter(|p| p.key == preset.key).count() > 1 {
                return Err(RaidBuddyError::Config(
                    format!("Duplicate preset key: {}", preset.key)
                ));
            }
            if preset.roles.is_empty() {
                return Err(RaidBuddyError::Config(
                    format!("Preset {} has no roles", preset.key)
                ));
            }
            for role in &preset.roles {
                if role.capacity == 0 {
                    return Err(RaidBuddyError::Config(
                        format!("Role {} in preset {} has zero capacity", role.name, preset.key)
                    ));
                }
                if preset.roles.iter().filter(|r| r.name == role.name).count() > 1 {
                    return Err(RaidBuddyError::Config(
                        format!("Duplicate role {} in preset {}", role.name, preset.key)
                    ));
                }
                // Role names double as claim-addressing keys, so they must
                // not shadow a status pseudo-role
                if preset.is_status(&role.name) {
                    return Err(RaidBuddyError::Config(
                        format!("Role {} in preset {} collides with a status name", role.name, preset.key)
                    ));
                }
            }
        }

        Ok(())
    }
}

fn role(name: &str, capacity: u32) -> RoleSlot {
    RoleSlot { name: name.to_string(), capacity }
}

fn preset(key: &str, title: &str, description: &str, roles: Vec<RoleSlot>) -> RolePreset {
    RolePreset {
        key: key.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        roles,
        statuses: Vec::new(),
    }
}

/// The default Albion Online event presets
fn builtin_presets() -> Vec<RolePreset> {
    vec![
        preset(
            "zvz",
            "ZvZ Event",
            "Large-scale ZvZ fight for the whole guild.",
            vec![
                role("Shotcaller", 1),
                role("Tank", 5),
                role("Healer", 4),
                role("DPS", 10),
                role("Scout", 2),
            ],
        ),
        preset(
            "ss",
            "Small Scale Event",
            "Small group out roaming and ganking.",
            vec![
                role("Tank", 2),
                role("Healer", 2),
                role("DPS", 6),
                role("Scout", 1),
            ],
        ),
        preset(
            "dungeon",
            "Dungeon Group",
            "Closed group for HCE or Avalonian dungeons.",
            vec![
                role("Tank", 1),
                role("Healer", 1),
                role("DPS", 3),
            ],
        ),
        preset(
            "faction",
            "Faction Warfare",
            "Join the faction war effort!",
            vec![
                role("Leader", 1),
                role("Tank", 4),
                role("Healer", 4),
                role("DPS", 8),
            ],
        ),
        preset(
            "ganking",
            "Ganking Squad",
            "Small mobile squad for the open world.",
            vec![
                role("Lead", 1),
                role("Healer", 2),
                role("Dagger", 2),
                role("Other DPS", 5),
                role("Scout", 1),
            ],
        ),
        preset(
            "arena",
            "Arena Practice",
            "Training session for 5v5 or Crystal League.",
            vec![
                role("Tank", 1),
                role("Healer", 1),
                role("DPS", 3),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.all().len(), 6);

        let zvz = catalog.get("zvz").unwrap();
        assert_eq!(zvz.title, "ZvZ Event");
        assert_eq!(zvz.role("DPS").unwrap().capacity, 10);
        assert!(catalog.get("unknown_type").is_none());
    }

    #[test]
    fn test_parse_catalog_file() {
        let content = r#"
            [[preset]]
            key = "gvg"
            title = "GvG Match"
            description = "5v5 territory fight."
            statuses = ["Maybe"]

            [[preset.roles]]
            name = "Tank"
            capacity = 1

            [[preset.roles]]
            name = "Healer"
            capacity = 1
        "#;

        let catalog = PresetCatalog::parse(content).unwrap();
        let gvg = catalog.get("gvg").unwrap();
        assert_eq!(gvg.roles.len(), 2);
        assert_eq!(gvg.statuses, vec!["Maybe".to_string()]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let content = r#"
            [[preset]]
            key = "bad"
            title = "Bad"
            description = "x"

            [[preset.roles]]
            name = "Tank"
            capacity = 0
        "#;
        assert!(PresetCatalog::parse(content).is_err());
    }

    #[test]
    fn test_role_status_collision_rejected() {
        let content = r#"
            [[preset]]
            key = "bad"
            title = "Bad"
            description = "x"
            statuses = ["Maybe"]

            [[preset.roles]]
            name = "Maybe"
            capacity = 2
        "#;
        assert!(PresetCatalog::parse(content).is_err());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let content = r#"
            [[preset]]
            key = "dup"
            title = "One"
            description = "x"
            [[preset.roles]]
            name = "Tank"
            capacity = 1

            [[preset]]
            key = "dup"
            title = "Two"
            description = "y"
            [[preset.roles]]
            name = "Tank"
            capacity = 1
        "#;
        assert!(PresetCatalog::parse(content).is_err());
    }

    #[tokio::test]
    async fn test_load_without_path_uses_builtin() {
        let catalog = PresetCatalog::load(None).await.unwrap();
        assert!(catalog.get("dungeon").is_some());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        assert!(PresetCatalog::load(Some("/nonexistent/presets.toml")).await.is_err());
    }
}
