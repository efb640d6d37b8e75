//! Structured battle events and their presentation
//!
//! The engine only emits these values. Turning them into log text and
//! floating numbers happens here so every front end renders the same way,
//! but nothing in this module touches a screen.

use crate::reward::RewardBundle;
use crate::types::{EffectKind, Element, PlayerAction};
use serde::{Deserialize, Serialize};

/// Everything observable that a transition can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted {
        boss: String,
        boss_level: u32,
    },
    PlayerHit {
        action: PlayerAction,
        damage: u32,
        /// Display crit: a rolled crit, or any lightning hit
        is_crit: bool,
    },
    LifeStolen {
        amount: u32,
    },
    DefendStance,
    EffectApplied {
        kind: EffectKind,
        turns: u32,
        refreshed: bool,
    },
    BossHit {
        damage: u32,
        defended: bool,
    },
    BossMissed,
    /// One damaging effect's share of a turn-boundary tick
    EffectTicked {
        kind: EffectKind,
        damage: u32,
    },
    EffectExpired {
        kind: EffectKind,
    },
    Victory,
    Defeat,
    /// Fired exactly once per session
    Completed {
        success: bool,
        final_player_hp: u32,
        rewards: Option<RewardBundle>,
    },
}

/// Where a floating value should appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Player,
    Boss,
}

/// Semantic colour of a floating value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatColor {
    /// Player damage on the boss
    Hit,
    Crit,
    Heal,
    /// Boss damage on the player
    Hurt,
    Miss,
    DamageOverTime,
}

/// A floating number for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingValue {
    pub amount: u32,
    pub anchor: Anchor,
    pub color: FloatColor,
    pub is_crit: bool,
}

impl BattleEvent {
    /// Human-readable combat log line, if the event deserves one
    pub fn log_line(&self, boss_name: &str) -> Option<String> {
        let line = match self {
            BattleEvent::BattleStarted { boss, boss_level } => {
                format!("{} (Lv.{}) blocks the way!", boss, boss_level)
            }
            BattleEvent::PlayerHit {
                action,
                damage,
                is_crit,
            } => {
                let crit = if *is_crit { " CRITICAL!" } else { "" };
                match action {
                    PlayerAction::ElementalAttack(element) => format!(
                        "{} deals {} {} damage to {}.{}",
                        action.label(),
                        damage,
                        element_word(*element),
                        boss_name,
                        crit
                    ),
                    _ => format!("You hit {} for {} damage.{}", boss_name, damage, crit),
                }
            }
            BattleEvent::LifeStolen { amount } => format!("You drain {} HP.", amount),
            BattleEvent::DefendStance => "You brace for the next blow.".to_string(),
            BattleEvent::EffectApplied {
                kind, refreshed, ..
            } => {
                if *refreshed {
                    format!("{} on {} is renewed.", kind, boss_name)
                } else {
                    format!("{} is afflicted with {}.", boss_name, kind)
                }
            }
            BattleEvent::BossHit { damage, defended } => {
                if *defended {
                    format!("{} strikes for {} (blocked half).", boss_name, damage)
                } else {
                    format!("{} strikes for {}.", boss_name, damage)
                }
            }
            BattleEvent::BossMissed => format!("You dodge {}'s attack!", boss_name),
            BattleEvent::EffectTicked { kind, damage } => {
                format!("{} takes {} damage from {}.", boss_name, damage, kind)
            }
            BattleEvent::EffectExpired { kind } => format!("{} wears off.", kind),
            BattleEvent::Victory => format!("{} is defeated!", boss_name),
            BattleEvent::Defeat => "You have fallen...".to_string(),
            BattleEvent::Completed { .. } => return None,
        };
        Some(line)
    }

    /// Floating value for damage, heals and misses
    pub fn floating_value(&self) -> Option<FloatingValue> {
        match *self {
            BattleEvent::PlayerHit {
                damage, is_crit, ..
            } => Some(FloatingValue {
                amount: damage,
                anchor: Anchor::Boss,
                color: if is_crit { FloatColor::Crit } else { FloatColor::Hit },
                is_crit,
            }),
            BattleEvent::LifeStolen { amount } => Some(FloatingValue {
                amount,
                anchor: Anchor::Player,
                color: FloatColor::Heal,
                is_crit: false,
            }),
            BattleEvent::BossHit { damage, .. } => Some(FloatingValue {
                amount: damage,
                anchor: Anchor::Player,
                color: FloatColor::Hurt,
                is_crit: false,
            }),
            BattleEvent::BossMissed => Some(FloatingValue {
                amount: 0,
                anchor: Anchor::Player,
                color: FloatColor::Miss,
                is_crit: false,
            }),
            BattleEvent::EffectTicked { damage, .. } => Some(FloatingValue {
                amount: damage,
                anchor: Anchor::Boss,
                color: FloatColor::DamageOverTime,
                is_crit: false,
            }),
            _ => None,
        }
    }
}

fn element_word(element: Element) -> &'static str {
    match element {
        Element::Fire => "fire",
        Element::Ice => "frost",
        Element::Lightning => "lightning",
        Element::Poison => "poison",
    }
}
