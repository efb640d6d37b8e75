//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side currently holds the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOwner {
    Player,
    Boss,
}

/// Terminal outcome of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    pub fn is_victory(self) -> bool {
        self == Outcome::Victory
    }
}

/// Elemental attack flavours a player may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Poison,
}

impl Element {
    /// Get all elements in display order
    pub fn all() -> &'static [Element] {
        &[
            Element::Fire,
            Element::Ice,
            Element::Lightning,
            Element::Poison,
        ]
    }

    /// Status effect installed on the boss by an attack of this element
    pub fn inflicts(self) -> Option<EffectKind> {
        match self {
            Element::Fire => Some(EffectKind::Burn),
            Element::Ice => Some(EffectKind::Slow),
            Element::Lightning => None,
            Element::Poison => Some(EffectKind::Poison),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Lightning => "Lightning",
            Element::Poison => "Poison",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status effect kinds that can sit on the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Burn,
    Poison,
    Slow,
}

impl EffectKind {
    pub fn all() -> &'static [EffectKind] {
        &[EffectKind::Burn, EffectKind::Poison, EffectKind::Slow]
    }

    /// Whether this effect deals damage on each tick
    pub fn is_damaging(self) -> bool {
        matches!(self, EffectKind::Burn | EffectKind::Poison)
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Burn => "Burn",
            EffectKind::Poison => "Poison",
            EffectKind::Slow => "Slow",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single player action, exactly one per player turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum PlayerAction {
    NormalAttack,
    Defend,
    ElementalAttack(Element),
}

impl PlayerAction {
    pub fn label(&self) -> String {
        match self {
            PlayerAction::NormalAttack => "Attack".to_string(),
            PlayerAction::Defend => "Defend".to_string(),
            PlayerAction::ElementalAttack(element) => format!("{} Strike", element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_effect_mapping() {
        assert_eq!(Element::Fire.inflicts(), Some(EffectKind::Burn));
        assert_eq!(Element::Ice.inflicts(), Some(EffectKind::Slow));
        assert_eq!(Element::Poison.inflicts(), Some(EffectKind::Poison));
        assert_eq!(Element::Lightning.inflicts(), None);
    }

    #[test]
    fn test_damaging_effects() {
        assert!(EffectKind::Burn.is_damaging());
        assert!(EffectKind::Poison.is_damaging());
        assert!(!EffectKind::Slow.is_damaging());
    }

    #[test]
    fn test_action_serialization() {
        let action = PlayerAction::ElementalAttack(Element::Ice);
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("elemental_attack"));
        assert!(json.contains("ice"));

        let back: PlayerAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
