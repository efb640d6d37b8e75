//! CombatState - the mutable core of one battle

use crate::effects::EffectTracker;
use crate::types::{Outcome, TurnOwner};
use serde::{Deserialize, Serialize};

/// Live state of a single battle
///
/// Only `BattleSession` mutates this; callers get a shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub turn_owner: TurnOwner,
    pub player_hp: u32,
    pub boss_hp: u32,
    pub effects: EffectTracker,
    /// Set by Defend, consumed by the next boss strike
    pub is_defending: bool,
    /// Multiplier on the boss attack, mirrors the slow effect
    pub boss_attack_modifier: f64,
    /// None until the battle ends, then fixed forever
    pub terminal: Option<Outcome>,
    /// True between an accepted player action and the boss reply
    pub action_locked: bool,
    /// Completed player/boss exchanges
    pub round: u32,
}

impl CombatState {
    pub fn new(player_hp: u32, boss_hp: u32, effects: EffectTracker) -> Self {
        CombatState {
            turn_owner: TurnOwner::Player,
            player_hp,
            boss_hp,
            effects,
            is_defending: false,
            boss_attack_modifier: 1.0,
            terminal: None,
            action_locked: false,
            round: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }

    /// Whether a player action would be accepted right now
    pub fn accepts_player_action(&self) -> bool {
        !self.is_finished() && !self.action_locked && self.turn_owner == TurnOwner::Player
    }
}
