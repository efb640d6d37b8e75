//! Transition - outcome of feeding one input to a session

use super::event::BattleEvent;
use crate::reward::RewardBundle;
use crate::types::{Element, Outcome, TurnOwner};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an input was absorbed as a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("an action is already in flight")]
    Locked,
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("the boss has nothing to reply to")]
    NotBossTurn,
    #[error("the battle is over")]
    Finished,
    #[error("no {0} attack power")]
    ElementUnavailable(Element),
    #[error("the session was disposed")]
    Disposed,
}

/// Before/after snapshot of the observable numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    pub player_hp_before: u32,
    pub player_hp_after: u32,
    pub boss_hp_before: u32,
    pub boss_hp_after: u32,
    pub turn_owner: TurnOwner,
    pub action_locked: bool,
    pub terminal: Option<Outcome>,
}

impl StateDelta {
    /// Signed player hp change (heals positive)
    pub fn player_hp_change(&self) -> i64 {
        self.player_hp_after as i64 - self.player_hp_before as i64
    }

    /// Signed boss hp change
    pub fn boss_hp_change(&self) -> i64 {
        self.boss_hp_after as i64 - self.boss_hp_before as i64
    }

    pub fn is_unchanged(&self) -> bool {
        self.player_hp_change() == 0 && self.boss_hp_change() == 0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.boss_hp_change() < 0 {
            parts.push(format!("boss -{}", -self.boss_hp_change()));
        }

        match self.player_hp_change() {
            0 => {}
            c if c < 0 => parts.push(format!("player -{}", -c)),
            c => parts.push(format!("player +{}", c)),
        }

        match self.terminal {
            Some(Outcome::Victory) => parts.push("VICTORY".to_string()),
            Some(Outcome::Defeat) => parts.push("DEFEAT".to_string()),
            None => {}
        }

        if parts.is_empty() {
            "No change".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Result of `BattleSession::apply`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub delta: StateDelta,
    pub events: Vec<BattleEvent>,
    /// Set when the input was absorbed; then `events` is empty and nothing changed
    pub rejection: Option<Rejection>,
}

impl Transition {
    pub fn rejected(delta: StateDelta, reason: Rejection) -> Self {
        Transition {
            delta,
            events: Vec::new(),
            rejection: Some(reason),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }

    /// The completion payload if this transition finished the battle
    pub fn completion(&self) -> Option<(bool, u32, Option<&RewardBundle>)> {
        self.events.iter().find_map(|e| match e {
            BattleEvent::Completed {
                success,
                final_player_hp,
                rewards,
            } => Some((*success, *final_player_hp, rewards.as_ref())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(player: (u32, u32), boss: (u32, u32), terminal: Option<Outcome>) -> StateDelta {
        StateDelta {
            player_hp_before: player.0,
            player_hp_after: player.1,
            boss_hp_before: boss.0,
            boss_hp_after: boss.1,
            turn_owner: TurnOwner::Boss,
            action_locked: true,
            terminal,
        }
    }

    #[test]
    fn test_delta_changes() {
        let d = delta((100, 110), (500, 440), None);
        assert_eq!(d.player_hp_change(), 10);
        assert_eq!(d.boss_hp_change(), -60);
        assert!(!d.is_unchanged());
    }

    #[test]
    fn test_delta_summary() {
        let d = delta((100, 100), (30, 0), Some(Outcome::Victory));
        let summary = d.summary();
        assert!(summary.contains("boss -30"));
        assert!(summary.contains("VICTORY"));

        let quiet = delta((5, 5), (5, 5), None);
        assert_eq!(quiet.summary(), "No change");
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::Locked.to_string(), "an action is already in flight");
        assert_eq!(
            Rejection::ElementUnavailable(Element::Fire).to_string(),
            "no Fire attack power"
        );
    }
}
