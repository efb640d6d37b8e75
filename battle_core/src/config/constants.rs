//! Tunable battle constants

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every tunable number the engine uses
///
/// All sections default to the shipped balance, so a TOML file only needs to
/// name the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConstants {
    pub damage: DamageConstants,
    pub boss: BossConstants,
    pub elements: ElementConstants,
    pub effects: EffectConstants,
    pub rewards: RewardConstants,
    pub log: LogConstants,
    pub pacing: PacingConstants,
}

impl BattleConstants {
    /// Load constants from a TOML file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: BattleConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string and validate them
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: BattleConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values the damage and effect formulas cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.damage;
        if d.variance_min < 0.0 || d.variance_min > d.variance_max {
            return Err(ConfigError::ValidationError(format!(
                "damage variance range {}..{} is invalid",
                d.variance_min, d.variance_max
            )));
        }
        if d.defense_divisor <= 0.0 || self.boss.defense_divisor <= 0.0 {
            return Err(ConfigError::ValidationError(
                "defense divisors must be positive".to_string(),
            ));
        }
        if self.boss.defend_divisor < 1.0 {
            return Err(ConfigError::ValidationError(
                "defend divisor must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.effects.slow_modifier) {
            return Err(ConfigError::ValidationError(
                "slow modifier must be within 0..=1".to_string(),
            ));
        }
        if self.effects.burn_turns == 0
            || self.effects.poison_turns == 0
            || self.effects.slow_turns == 0
        {
            return Err(ConfigError::ValidationError(
                "effect durations must be at least one turn".to_string(),
            ));
        }
        let r = &self.rewards;
        if r.enhancement_stone_min > r.enhancement_stone_max
            || r.refining_stone_min > r.refining_stone_max
        {
            return Err(ConfigError::ValidationError(
                "reward quantity ranges must have min <= max".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&r.socket_drill_chance) {
            return Err(ConfigError::ValidationError(
                "socket drill chance must be within 0..=1".to_string(),
            ));
        }
        if self.log.capacity == 0 {
            return Err(ConfigError::ValidationError(
                "combat log capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Player hit formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConstants {
    /// Lower bound of the uniform variance multiplier
    pub variance_min: f64,
    /// Upper bound of the uniform variance multiplier
    pub variance_max: f64,
    /// Defense is divided by this before subtracting from attack
    pub defense_divisor: f64,
    /// Floor applied to `attack - defense / divisor` before variance
    pub base_floor: f64,
    /// Floor applied to the final floored amount (0 keeps the raw formula)
    pub min_hit: u32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            variance_min: 0.9,
            variance_max: 1.1,
            defense_divisor: 2.0,
            base_floor: 1.0,
            min_hit: 1,
        }
    }
}

/// Boss strike formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConstants {
    /// Floor applied before variance
    pub damage_floor: f64,
    pub defense_divisor: f64,
    /// Incoming damage is divided by this while defending
    pub defend_divisor: f64,
}

impl Default for BossConstants {
    fn default() -> Self {
        BossConstants {
            damage_floor: 5.0,
            defense_divisor: 2.0,
            defend_divisor: 2.0,
        }
    }
}

/// Elemental bonus scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementConstants {
    pub fire_multiplier: f64,
    pub ice_multiplier: f64,
    pub lightning_multiplier: f64,
    pub poison_multiplier: f64,
    /// Heal from elemental attacks too. Off keeps lifesteal on plain attacks only.
    pub lifesteal_on_elemental: bool,
}

impl ElementConstants {
    pub fn multiplier(&self, element: crate::types::Element) -> f64 {
        use crate::types::Element;
        match element {
            Element::Fire => self.fire_multiplier,
            Element::Ice => self.ice_multiplier,
            Element::Lightning => self.lightning_multiplier,
            Element::Poison => self.poison_multiplier,
        }
    }
}

impl Default for ElementConstants {
    fn default() -> Self {
        ElementConstants {
            fire_multiplier: 1.5,
            ice_multiplier: 1.3,
            lightning_multiplier: 2.0,
            poison_multiplier: 1.0,
            lifesteal_on_elemental: false,
        }
    }
}

/// Status effect parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConstants {
    /// Fraction of boss max hp dealt per burn tick
    pub burn_fraction: f64,
    pub burn_turns: u32,
    /// Fraction of boss max hp dealt per poison tick
    pub poison_fraction: f64,
    pub poison_turns: u32,
    /// Boss attack multiplier while slowed
    pub slow_modifier: f64,
    pub slow_turns: u32,
}

impl Default for EffectConstants {
    fn default() -> Self {
        EffectConstants {
            burn_fraction: 0.03,
            burn_turns: 3,
            poison_fraction: 0.02,
            poison_turns: 5,
            slow_modifier: 0.7,
            slow_turns: 2,
        }
    }
}

/// Victory payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConstants {
    pub experience_per_level: u64,
    pub gold_per_level: u64,
    /// Boss-fight multiplier applied to both experience and gold
    pub boss_multiplier: u64,
    pub enhancement_stone_min: u32,
    pub enhancement_stone_max: u32,
    pub refining_stone_min: u32,
    pub refining_stone_max: u32,
    /// Bosses at or above this level drop the better gem
    pub iron_gem_level: u32,
    pub socket_drill_chance: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            experience_per_level: 150,
            gold_per_level: 100,
            boss_multiplier: 3,
            enhancement_stone_min: 1,
            enhancement_stone_max: 3,
            refining_stone_min: 1,
            refining_stone_max: 2,
            iron_gem_level: 10,
            socket_drill_chance: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConstants {
    /// Number of combat log lines kept
    pub capacity: usize,
}

impl Default for LogConstants {
    fn default() -> Self {
        LogConstants { capacity: 10 }
    }
}

/// Presentation pacing, in milliseconds of caller-owned time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConstants {
    /// Delay between a player action resolving and the boss reply
    pub boss_reply_delay_ms: u64,
}

impl Default for PacingConstants {
    fn default() -> Self {
        PacingConstants {
            boss_reply_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = BattleConstants::default();
        assert!((constants.damage.variance_min - 0.9).abs() < f64::EPSILON);
        assert!((constants.boss.damage_floor - 5.0).abs() < f64::EPSILON);
        assert!((constants.effects.slow_modifier - 0.7).abs() < f64::EPSILON);
        assert_eq!(constants.rewards.experience_per_level, 150);
        assert!(!constants.elements.lifesteal_on_elemental);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[damage]
min_hit = 0

[elements]
lifesteal_on_elemental = true

[log]
capacity = 4
"#;

        let constants = BattleConstants::parse(toml).unwrap();
        assert_eq!(constants.damage.min_hit, 0);
        assert!((constants.damage.variance_max - 1.1).abs() < f64::EPSILON);
        assert!(constants.elements.lifesteal_on_elemental);
        assert_eq!(constants.log.capacity, 4);
        assert_eq!(constants.effects.burn_turns, 3);
    }

    #[test]
    fn test_invalid_variance_rejected() {
        let toml = r#"
[damage]
variance_min = 1.2
variance_max = 1.0
"#;
        let err = BattleConstants::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_reward_range_rejected() {
        let toml = r#"
[rewards]
enhancement_stone_min = 4
enhancement_stone_max = 2
"#;
        assert!(BattleConstants::parse(toml).is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = BattleConstants::parse("[damage\nmin_hit = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
