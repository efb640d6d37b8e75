//! Damage Resolver - attacker/defender stats into a hit amount
//!
//! Formula:
//! 1. base = max(base_floor, attack - defense / defense_divisor)
//! 2. raw = base * Uniform(variance_min, variance_max)
//! 3. crit if roll < crit_chance / 100, then raw *= 1 + crit_damage / 100
//! 4. raw += elemental_bonus
//! 5. amount = max(min_hit, floor(raw))
//!
//! Random draws happen in a fixed order (variance, then crit) so a seeded
//! generator replays the same hits.

use crate::config::{DamageConstants, ElementConstants};
use crate::stats::ElementalAttack;
use crate::types::Element;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of a single resolved hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    pub amount: u32,
    pub is_crit: bool,
}

/// Resolve a hit with the default damage constants
pub fn resolve_damage(
    attack: f64,
    defense: f64,
    crit_chance: f64,
    crit_damage: f64,
    elemental_bonus: f64,
    rng: &mut impl Rng,
) -> DamageRoll {
    resolve_damage_with(
        &DamageConstants::default(),
        attack,
        defense,
        crit_chance,
        crit_damage,
        elemental_bonus,
        rng,
    )
}

/// Resolve a hit with explicit constants
///
/// Inputs are trusted to be non-negative. Never fails.
pub fn resolve_damage_with(
    constants: &DamageConstants,
    attack: f64,
    defense: f64,
    crit_chance: f64,
    crit_damage: f64,
    elemental_bonus: f64,
    rng: &mut impl Rng,
) -> DamageRoll {
    let base = (attack - defense / constants.defense_divisor).max(constants.base_floor);
    let mut raw = base * roll_variance(constants, rng);

    let is_crit = rng.gen::<f64>() < crit_chance / 100.0;
    if is_crit {
        raw *= 1.0 + crit_damage / 100.0;
    }

    raw += elemental_bonus;

    let amount = floor_to_u32(raw).max(constants.min_hit);
    DamageRoll { amount, is_crit }
}

/// Draw the uniform variance multiplier
pub fn roll_variance(constants: &DamageConstants, rng: &mut impl Rng) -> f64 {
    if constants.variance_min >= constants.variance_max {
        constants.variance_min
    } else {
        rng.gen_range(constants.variance_min..=constants.variance_max)
    }
}

/// Flat bonus an elemental attack adds on top of the resolved hit
pub fn elemental_bonus(
    constants: &ElementConstants,
    elemental: &ElementalAttack,
    element: Element,
) -> f64 {
    elemental.get(element) as f64 * constants.multiplier(element)
}

pub(crate) fn floor_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_basic_damage_in_variance_band() {
        let mut rng = make_test_rng();
        for _ in 0..200 {
            let roll = resolve_damage(50.0, 0.0, 0.0, 0.0, 0.0, &mut rng);
            assert!((45..=55).contains(&roll.amount), "got {}", roll.amount);
            assert!(!roll.is_crit);
        }
    }

    #[test]
    fn test_defense_halved() {
        // 60 - 40 / 2 = 40 base
        let mut rng = make_test_rng();
        for _ in 0..100 {
            let roll = resolve_damage(60.0, 40.0, 0.0, 0.0, 0.0, &mut rng);
            assert!((36..=44).contains(&roll.amount));
        }
    }

    #[test]
    fn test_guaranteed_crit() {
        // 100 base, +50% on crit
        let mut rng = make_test_rng();
        for _ in 0..100 {
            let roll = resolve_damage(100.0, 0.0, 100.0, 50.0, 0.0, &mut rng);
            assert!(roll.is_crit);
            assert!((135..=165).contains(&roll.amount));
        }
    }

    #[test]
    fn test_elemental_bonus_added_after_crit() {
        // Zero draws: variance = 0.9, crit roll = 0.0 < 1.0
        let mut rng = StepRng::new(0, 0);
        let roll = resolve_damage(100.0, 0.0, 100.0, 100.0, 15.0, &mut rng);
        // 100 * 0.9 * 2 + 15
        assert_eq!(roll.amount, 195);
        assert!(roll.is_crit);
    }

    #[test]
    fn test_overwhelming_defense_hits_floor() {
        let mut rng = make_test_rng();
        let roll = resolve_damage(1.0, 1000.0, 0.0, 0.0, 0.0, &mut rng);
        assert_eq!(roll.amount, 1);
    }

    #[test]
    fn test_raw_formula_can_floor_to_zero() {
        let constants = DamageConstants {
            min_hit: 0,
            ..Default::default()
        };
        let mut rng = StepRng::new(0, 0);
        // base 1 * 0.9 variance floors to 0 without the hit floor
        let roll = resolve_damage_with(&constants, 0.0, 10.0, 0.0, 0.0, 0.0, &mut rng);
        assert_eq!(roll.amount, 0);
    }

    #[test]
    fn test_elemental_bonus_scaling() {
        let constants = ElementConstants::default();
        let elemental = ElementalAttack {
            fire: 10,
            ice: 10,
            lightning: 10,
            poison: 10,
        };
        assert!((elemental_bonus(&constants, &elemental, Element::Fire) - 15.0).abs() < 1e-9);
        assert!((elemental_bonus(&constants, &elemental, Element::Ice) - 13.0).abs() < 1e-9);
        assert!((elemental_bonus(&constants, &elemental, Element::Lightning) - 20.0).abs() < 1e-9);
        assert!((elemental_bonus(&constants, &elemental, Element::Poison) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_hits() {
        let mut a = make_test_rng();
        let mut b = make_test_rng();
        for _ in 0..20 {
            assert_eq!(
                resolve_damage(80.0, 20.0, 25.0, 60.0, 4.0, &mut a),
                resolve_damage(80.0, 20.0, 25.0, 60.0, 4.0, &mut b)
            );
        }
    }

    #[test]
    fn test_floor_to_u32_clamps() {
        assert_eq!(floor_to_u32(-3.5), 0);
        assert_eq!(floor_to_u32(f64::NAN), 0);
        assert_eq!(floor_to_u32(7.99), 7);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn zero_crit_chance_never_crits(
                attack in 0u32..10_000,
                defense in 0u32..10_000,
                crit_damage in 0.0f64..500.0,
                seed in any::<u64>(),
            ) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let roll = resolve_damage(attack as f64, defense as f64, 0.0, crit_damage, 0.0, &mut rng);
                prop_assert!(!roll.is_crit);
            }

            #[test]
            fn raw_formula_amount_is_bounded(
                attack in 0u32..10_000,
                defense in 0u32..10_000,
                seed in any::<u64>(),
            ) {
                let constants = DamageConstants { min_hit: 0, ..Default::default() };
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let roll = resolve_damage_with(&constants, attack as f64, defense as f64, 0.0, 0.0, 0.0, &mut rng);
                let base = (attack as f64 - defense as f64 / 2.0).max(1.0);
                prop_assert!(roll.amount as f64 <= base * 1.1);
            }
        }
    }
}
