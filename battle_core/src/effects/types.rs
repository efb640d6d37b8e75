//! Status effect instances

use crate::config::EffectConstants;
use crate::types::EffectKind;
use serde::{Deserialize, Serialize};

/// An active status effect on the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: EffectKind,
    /// Turns left, always > 0 while tracked
    pub remaining_turns: u32,
    /// Damage dealt on each tick (0 for slow)
    pub tick_damage: u32,
}

impl StatusEffect {
    pub fn new(kind: EffectKind, remaining_turns: u32, tick_damage: u32) -> Self {
        StatusEffect {
            kind,
            remaining_turns,
            tick_damage,
        }
    }

    /// Build the effect an elemental hit installs on a boss of the given max hp
    pub fn inflicted(kind: EffectKind, boss_max_hp: u32, constants: &EffectConstants) -> Self {
        let (turns, fraction) = match kind {
            EffectKind::Burn => (constants.burn_turns, constants.burn_fraction),
            EffectKind::Poison => (constants.poison_turns, constants.poison_fraction),
            EffectKind::Slow => (constants.slow_turns, 0.0),
        };
        let tick_damage = (boss_max_hp as f64 * fraction).floor() as u32;
        StatusEffect::new(kind, turns, tick_damage)
    }

    pub fn is_active(&self) -> bool {
        self.remaining_turns > 0
    }

    /// Damage this effect contributes to the next tick
    pub fn pending_damage(&self) -> u32 {
        if self.kind.is_damaging() {
            self.tick_damage
        } else {
            0
        }
    }

    /// Total damage still to come if the effect runs out its duration
    pub fn total_remaining_damage(&self) -> u32 {
        self.pending_damage().saturating_mul(self.remaining_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_from_max_hp() {
        let burn = StatusEffect::inflicted(EffectKind::Burn, 1000, &EffectConstants::default());
        assert_eq!(burn.tick_damage, 30);
        assert_eq!(burn.remaining_turns, 3);
        assert_eq!(burn.total_remaining_damage(), 90);
    }

    #[test]
    fn test_poison_floors() {
        // 2% of 149 = 2.98
        let poison = StatusEffect::inflicted(EffectKind::Poison, 149, &EffectConstants::default());
        assert_eq!(poison.tick_damage, 2);
        assert_eq!(poison.remaining_turns, 5);
    }

    #[test]
    fn test_slow_deals_nothing() {
        let slow = StatusEffect::inflicted(EffectKind::Slow, 5000, &EffectConstants::default());
        assert_eq!(slow.tick_damage, 0);
        assert_eq!(slow.pending_damage(), 0);
        assert_eq!(slow.remaining_turns, 2);
    }
}
