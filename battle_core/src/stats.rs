//! Combatant stat bundles handed in by the surrounding character/dungeon systems
//!
//! Both bundles arrive fully resolved. The engine copies them into the session
//! at construction and never writes back to the caller's profile.

use crate::types::Element;
use serde::{Deserialize, Serialize};

/// Flat elemental attack values carried by the player
///
/// A zero value means the matching elemental action is unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementalAttack {
    #[serde(default)]
    pub fire: u32,
    #[serde(default)]
    pub ice: u32,
    #[serde(default)]
    pub lightning: u32,
    #[serde(default)]
    pub poison: u32,
}

impl ElementalAttack {
    /// Raw stat for an element
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Fire => self.fire,
            Element::Ice => self.ice,
            Element::Lightning => self.lightning,
            Element::Poison => self.poison,
        }
    }

    pub fn has(&self, element: Element) -> bool {
        self.get(element) > 0
    }

    /// Elements with a non-zero stat, in display order
    pub fn available(&self) -> Vec<Element> {
        Element::all()
            .iter()
            .copied()
            .filter(|e| self.has(*e))
            .collect()
    }
}

/// Player combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default)]
    pub speed: u32,
    /// Opaque aggregate score from the character system, display only
    #[serde(default)]
    pub combat_power: u32,
    #[serde(default)]
    pub elemental: ElementalAttack,
    /// Percent chance (0-100)
    #[serde(default)]
    pub crit_chance: f64,
    /// Percent bonus applied on crit (50 = +50%)
    #[serde(default)]
    pub crit_damage: f64,
    /// Percent of dealt damage healed back
    #[serde(default)]
    pub life_steal: f64,
    /// Percent chance (0-100) to dodge a boss strike
    #[serde(default)]
    pub dodge_chance: f64,
}

impl PlayerStats {
    /// Create a player with the core stats and no secondary modifiers
    pub fn new(max_hp: u32, attack: u32, defense: u32) -> Self {
        PlayerStats {
            hp: max_hp,
            max_hp,
            attack,
            defense,
            speed: 0,
            combat_power: 0,
            elemental: ElementalAttack::default(),
            crit_chance: 0.0,
            crit_damage: 0.0,
            life_steal: 0.0,
            dodge_chance: 0.0,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_elemental(mut self, elemental: ElementalAttack) -> Self {
        self.elemental = elemental;
        self
    }

    pub fn with_crit(mut self, chance: f64, damage: f64) -> Self {
        self.crit_chance = chance;
        self.crit_damage = damage;
        self
    }

    pub fn with_life_steal(mut self, life_steal: f64) -> Self {
        self.life_steal = life_steal;
        self
    }

    pub fn with_dodge(mut self, dodge_chance: f64) -> Self {
        self.dodge_chance = dodge_chance;
        self
    }
}

/// Boss combatant, supplied by the dungeon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossStats {
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl BossStats {
    pub fn new(name: impl Into<String>, level: u32, max_hp: u32, attack: u32, defense: u32) -> Self {
        BossStats {
            name: name.into(),
            level,
            max_hp,
            attack,
            defense,
        }
    }
}
