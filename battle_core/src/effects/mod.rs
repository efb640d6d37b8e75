//! Status Effect Tracker - burn, poison and slow on the boss

pub mod tick;
mod types;

pub use tick::{process_tick, EffectTickResult};
pub use types::StatusEffect;

use crate::config::EffectConstants;
use crate::types::EffectKind;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Active effects on the boss, at most one per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTracker {
    effects: Vec<StatusEffect>,
    constants: EffectConstants,
}

impl EffectTracker {
    /// Create a new empty tracker
    pub fn new(constants: EffectConstants) -> Self {
        EffectTracker {
            effects: Vec::new(),
            constants,
        }
    }

    /// Install an effect, discarding any active effect of the same kind
    ///
    /// Returns the replaced instance. Durations and damage never stack.
    pub fn apply(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        let replaced = self
            .effects
            .iter()
            .position(|e| e.kind == effect.kind)
            .map(|i| self.effects.remove(i));

        if effect.is_active() {
            self.effects.push(effect);
        }

        trace!(kind = %effect.kind, turns = effect.remaining_turns, refreshed = replaced.is_some(), "effect applied");
        replaced
    }

    /// Build and install the effect an elemental hit inflicts
    pub fn inflict(&mut self, kind: EffectKind, boss_max_hp: u32) -> (StatusEffect, Option<StatusEffect>) {
        let effect = StatusEffect::inflicted(kind, boss_max_hp, &self.constants);
        let replaced = self.apply(effect);
        (effect, replaced)
    }

    /// Run one turn-boundary tick against the boss hp
    pub fn tick(&mut self, boss_hp: &mut u32) -> EffectTickResult {
        process_tick(&mut self.effects, boss_hp)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Boss attack multiplier: the slow modifier while slowed, else 1.0
    pub fn attack_modifier(&self) -> f64 {
        if self.is_active(EffectKind::Slow) {
            self.constants.slow_modifier
        } else {
            1.0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Damage the next tick will deal
    pub fn pending_tick_damage(&self) -> u32 {
        self.effects.iter().map(|e| e.pending_damage()).sum()
    }
}
