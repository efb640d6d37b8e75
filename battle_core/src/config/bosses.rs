//! Boss roster loading

use super::ConfigError;
use crate::stats::BossStats;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One boss entry as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossEntry {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl BossEntry {
    /// Build the combatant the engine consumes
    pub fn stats(&self) -> BossStats {
        BossStats::new(self.name.clone(), self.level, self.max_hp, self.attack, self.defense)
    }
}

/// Container for boss configurations, kept in file order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossRoster {
    #[serde(rename = "bosses")]
    pub bosses: Vec<BossEntry>,
}

impl BossRoster {
    /// Look up a boss by id
    pub fn get(&self, id: &str) -> Option<BossStats> {
        self.bosses.iter().find(|b| b.id == id).map(BossEntry::stats)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bosses.iter().map(|b| b.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.bosses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bosses.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (i, entry) in self.bosses.iter().enumerate() {
            if entry.max_hp == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "boss '{}' has zero max_hp",
                    entry.id
                )));
            }
            if self.bosses[..i].iter().any(|b| b.id == entry.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate boss id '{}'",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}

/// Load a boss roster from a TOML file
pub fn load_boss_roster(path: &Path) -> Result<BossRoster, ConfigError> {
    let roster: BossRoster = super::load_toml(path)?;
    roster.validate()?;
    Ok(roster)
}

/// Load a boss roster from a TOML string
pub fn parse_boss_roster(content: &str) -> Result<BossRoster, ConfigError> {
    let roster: BossRoster = super::parse_toml(content)?;
    roster.validate()?;
    Ok(roster)
}

/// Get the default boss roster
pub fn default_bosses() -> BossRoster {
    let toml = include_str!("../../config/bosses.toml");
    parse_boss_roster(toml).unwrap_or_else(|_| BossRoster {
        bosses: vec![BossEntry {
            id: "mossback_toad".to_string(),
            name: "Mossback Toad".to_string(),
            level: 3,
            max_hp: 420,
            attack: 28,
            defense: 10,
        }],
    })
}
