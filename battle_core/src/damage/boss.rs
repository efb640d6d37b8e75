//! Boss strike - the single reply resolved on each boss turn

use super::resolver::{floor_to_u32, roll_variance};
use crate::config::BattleConstants;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of one boss strike against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossStrike {
    /// Damage that lands on the player
    pub damage: u32,
    /// Damage before dodge/defend were applied
    pub rolled: u32,
    /// The player dodged, nothing landed
    pub dodged: bool,
    /// The defend stance halved this strike
    pub defended: bool,
}

/// Resolve a boss strike
///
/// `attack_modifier` comes from the effect tracker (slow). A dodge wins over
/// a defend stance: the strike is a miss whether or not the player defended.
pub fn resolve_boss_strike(
    constants: &BattleConstants,
    boss_attack: u32,
    attack_modifier: f64,
    player_defense: u32,
    dodge_chance: f64,
    is_defending: bool,
    rng: &mut impl Rng,
) -> BossStrike {
    let effective_attack = (boss_attack as f64 * attack_modifier).floor();
    let base = (effective_attack - player_defense as f64 / constants.boss.defense_divisor)
        .max(constants.boss.damage_floor);
    let rolled = floor_to_u32(base * roll_variance(&constants.damage, rng));

    if rng.gen::<f64>() < dodge_chance / 100.0 {
        return BossStrike {
            damage: 0,
            rolled,
            dodged: true,
            defended: false,
        };
    }

    let damage = if is_defending {
        floor_to_u32(rolled as f64 / constants.boss.defend_divisor)
    } else {
        rolled
    };

    BossStrike {
        damage,
        rolled,
        dodged: false,
        defended: is_defending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_strike_in_band() {
        let constants = BattleConstants::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            // 60 - 20 / 2 = 50
            let strike = resolve_boss_strike(&constants, 60, 1.0, 20, 0.0, false, &mut rng);
            assert!((45..=55).contains(&strike.damage));
            assert!(!strike.dodged);
        }
    }

    #[test]
    fn test_damage_floor_of_five() {
        let constants = BattleConstants::default();
        let mut rng = StepRng::new(0, 0);
        // Zero draws dodge at any positive chance, so dodge stays at 0
        let strike = resolve_boss_strike(&constants, 1, 1.0, 500, 0.0, false, &mut rng);
        // floor 5 * variance 0.9
        assert_eq!(strike.damage, 4);
    }

    #[test]
    fn test_slow_modifier_floors_attack() {
        let constants = BattleConstants::default();
        let mut rng = StepRng::new(0, 0);
        // floor(101 * 0.7) = 70, * 0.9 = 63
        let strike = resolve_boss_strike(&constants, 101, 0.7, 0, 0.0, false, &mut rng);
        assert_eq!(strike.damage, 63);
    }

    #[test]
    fn test_defend_halves() {
        let constants = BattleConstants::default();
        let mut rng = StepRng::new(0, 0);
        // 100 * 0.9 = 90, halved = 45
        let strike = resolve_boss_strike(&constants, 100, 1.0, 0, 0.0, true, &mut rng);
        assert_eq!(strike.rolled, 90);
        assert_eq!(strike.damage, 45);
        assert!(strike.defended);
    }

    #[test]
    fn test_dodge_beats_defend() {
        let constants = BattleConstants::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let strike = resolve_boss_strike(&constants, 100, 1.0, 0, 100.0, true, &mut rng);
        assert!(strike.dodged);
        assert_eq!(strike.damage, 0);
        assert!(!strike.defended);
    }
}
