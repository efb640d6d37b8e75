//! Effect tick processing at a turn boundary

use super::StatusEffect;
use crate::types::EffectKind;
use serde::{Deserialize, Serialize};

/// Result of one turn-boundary tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTickResult {
    /// Damage each damaging effect actually dealt, in application order
    pub damage_by_kind: Vec<(EffectKind, u32)>,
    /// Total damage subtracted from the boss (after the zero floor)
    pub total_damage: u32,
    /// Effects that ran out on this tick
    pub expired: Vec<EffectKind>,
}

impl EffectTickResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_damage(&mut self, kind: EffectKind, amount: u32) {
        if let Some(entry) = self.damage_by_kind.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 += amount;
        } else {
            self.damage_by_kind.push((kind, amount));
        }
    }

    /// Whether this tick changed anything worth reporting
    pub fn is_empty(&self) -> bool {
        self.total_damage == 0 && self.expired.is_empty()
    }
}

/// Process a single tick over the active effects
///
/// Burn and poison damage is subtracted from `boss_hp`, floored at zero.
/// Each kind is credited only with the hp it actually removed, so the
/// per-kind amounts always sum to `total_damage`. Every effect then loses a
/// turn and effects reaching zero are dropped.
pub fn process_tick(effects: &mut Vec<StatusEffect>, boss_hp: &mut u32) -> EffectTickResult {
    let mut result = EffectTickResult::new();

    for effect in effects.iter().filter(|e| e.is_active()) {
        let dealt = effect.pending_damage().min(*boss_hp);
        if dealt > 0 {
            *boss_hp -= dealt;
            result.add_damage(effect.kind, dealt);
            result.total_damage += dealt;
        }
    }

    for effect in effects.iter_mut() {
        effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
    }

    result.expired = effects
        .iter()
        .filter(|e| !e.is_active())
        .map(|e| e.kind)
        .collect();

    effects.retain(|e| e.is_active());

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_sums_damaging_effects() {
        let mut effects = vec![
            StatusEffect::new(EffectKind::Burn, 3, 30),
            StatusEffect::new(EffectKind::Poison, 5, 20),
            StatusEffect::new(EffectKind::Slow, 2, 0),
        ];
        let mut hp = 1000;

        let result = process_tick(&mut effects, &mut hp);

        assert_eq!(hp, 950);
        assert_eq!(result.total_damage, 50);
        assert_eq!(result.damage_by_kind.len(), 2);
        assert!(result.expired.is_empty());
        assert_eq!(effects[0].remaining_turns, 2);
        assert_eq!(effects[2].remaining_turns, 1);
    }

    #[test]
    fn test_tick_floors_hp_at_zero() {
        let mut effects = vec![StatusEffect::new(EffectKind::Burn, 3, 30)];
        let mut hp = 12;

        let result = process_tick(&mut effects, &mut hp);

        assert_eq!(hp, 0);
        assert_eq!(result.total_damage, 12);
        assert_eq!(result.damage_by_kind, vec![(EffectKind::Burn, 12)]);
    }

    #[test]
    fn test_overkill_credits_only_dealt_damage() {
        let mut effects = vec![
            StatusEffect::new(EffectKind::Burn, 3, 30),
            StatusEffect::new(EffectKind::Poison, 5, 20),
        ];
        let mut hp = 40;

        let result = process_tick(&mut effects, &mut hp);

        assert_eq!(hp, 0);
        assert_eq!(result.damage_by_kind, vec![(EffectKind::Burn, 30), (EffectKind::Poison, 10)]);
        assert_eq!(result.total_damage, 40);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_slow_only_tick_is_empty_until_expiry() {
        let mut effects = vec![StatusEffect::new(EffectKind::Slow, 2, 0)];
        let mut hp = 100;

        assert!(process_tick(&mut effects, &mut hp).is_empty());
        assert!(!process_tick(&mut effects, &mut hp).is_empty());
    }

    #[test]
    fn test_tick_expires_last_turn() {
        let mut effects = vec![
            StatusEffect::new(EffectKind::Slow, 1, 0),
            StatusEffect::new(EffectKind::Burn, 2, 5),
        ];
        let mut hp = 100;

        let result = process_tick(&mut effects, &mut hp);

        assert_eq!(result.expired, vec![EffectKind::Slow]);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::Burn);
    }

    #[test]
    fn test_expiring_effect_still_deals_last_tick() {
        let mut effects = vec![StatusEffect::new(EffectKind::Poison, 1, 7)];
        let mut hp = 100;

        let result = process_tick(&mut effects, &mut hp);

        assert_eq!(hp, 93);
        assert_eq!(result.expired, vec![EffectKind::Poison]);
        assert!(effects.is_empty());
    }
}
