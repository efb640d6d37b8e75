//! Reward Generator - the victory payout

use crate::config::RewardConstants;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENHANCEMENT_STONE: &str = "Enhancement Stone";
pub const REFINING_STONE: &str = "Refining Stone";
pub const SOCKET_DRILL: &str = "Socket Drill";
pub const IRON_GEM: &str = "Iron Gem";
pub const WOODEN_GEM: &str = "Wooden Gem";

/// A named stack of identical items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardStack {
    pub name: String,
    pub quantity: u32,
}

impl RewardStack {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        RewardStack {
            name: name.into(),
            quantity,
        }
    }
}

/// Everything a victory pays out
///
/// Built once at the victory transition and handed to the caller by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    pub experience: u64,
    pub gold: u64,
    pub items: Vec<RewardStack>,
    pub gems: Vec<RewardStack>,
}

impl RewardBundle {
    /// Quantity of a named item or gem, 0 if absent
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.items
            .iter()
            .chain(self.gems.iter())
            .filter(|s| s.name == name)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} XP", self.experience),
            format!("{} gold", self.gold),
        ];
        for stack in self.items.iter().chain(self.gems.iter()) {
            parts.push(format!("{} x{}", stack.name, stack.quantity));
        }
        parts.join(", ")
    }
}

/// Roll the payout for a defeated boss of the given level
///
/// Draw order is fixed (enhancement stones, refining stones, socket drill)
/// so a seeded generator reproduces the same bundle. An inverted quantity
/// range collapses to its minimum.
pub fn generate_rewards(boss_level: u32, constants: &RewardConstants, rng: &mut impl Rng) -> RewardBundle {
    let level = boss_level as u64;
    let experience = level * constants.experience_per_level * constants.boss_multiplier;
    let gold = level * constants.gold_per_level * constants.boss_multiplier;

    let mut items = vec![
        RewardStack::new(
            ENHANCEMENT_STONE,
            draw_quantity(constants.enhancement_stone_min, constants.enhancement_stone_max, rng),
        ),
        RewardStack::new(
            REFINING_STONE,
            draw_quantity(constants.refining_stone_min, constants.refining_stone_max, rng),
        ),
    ];

    if rng.gen::<f64>() < constants.socket_drill_chance {
        items.push(RewardStack::new(SOCKET_DRILL, 1));
    }

    let gem = if boss_level >= constants.iron_gem_level {
        IRON_GEM
    } else {
        WOODEN_GEM
    };

    let bundle = RewardBundle {
        experience,
        gold,
        items,
        gems: vec![RewardStack::new(gem, 1)],
    };
    debug!(boss_level, rewards = %bundle.summary(), "rewards generated");
    bundle
}

fn draw_quantity(min: u32, max: u32, rng: &mut impl Rng) -> u32 {
    rng.gen_range(min..=max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_level_ten_payout() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let bundle = generate_rewards(10, &RewardConstants::default(), &mut rng);

        assert_eq!(bundle.experience, 4500);
        assert_eq!(bundle.gold, 3000);
        assert_eq!(bundle.items[0].name, ENHANCEMENT_STONE);
        assert_eq!(bundle.items[1].name, REFINING_STONE);
        assert_eq!(bundle.gems, vec![RewardStack::new(IRON_GEM, 1)]);
    }

    #[test]
    fn test_low_level_gets_wooden_gem() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let bundle = generate_rewards(9, &RewardConstants::default(), &mut rng);
        assert_eq!(bundle.gems[0].name, WOODEN_GEM);
        assert_eq!(bundle.experience, 9 * 450);
    }

    #[test]
    fn test_quantities_stay_in_range() {
        let constants = RewardConstants::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut drills = 0;
        for _ in 0..1000 {
            let bundle = generate_rewards(5, &constants, &mut rng);
            assert!((1..=3).contains(&bundle.quantity_of(ENHANCEMENT_STONE)));
            assert!((1..=2).contains(&bundle.quantity_of(REFINING_STONE)));
            if bundle.quantity_of(SOCKET_DRILL) > 0 {
                assert_eq!(bundle.items.len(), 3);
                drills += 1;
            } else {
                assert_eq!(bundle.items.len(), 2);
            }
        }
        // 30% chance, loose bounds
        assert!((200..400).contains(&drills), "drills = {}", drills);
    }

    #[test]
    fn test_zero_draws_give_minimums_and_drill() {
        let mut rng = StepRng::new(0, 0);
        let bundle = generate_rewards(1, &RewardConstants::default(), &mut rng);
        assert_eq!(bundle.quantity_of(ENHANCEMENT_STONE), 1);
        assert_eq!(bundle.quantity_of(REFINING_STONE), 1);
        assert_eq!(bundle.quantity_of(SOCKET_DRILL), 1);
    }

    #[test]
    fn test_inverted_range_uses_minimum() {
        let constants = RewardConstants {
            enhancement_stone_min: 4,
            enhancement_stone_max: 1,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        for _ in 0..20 {
            let bundle = generate_rewards(2, &constants, &mut rng);
            assert_eq!(bundle.quantity_of(ENHANCEMENT_STONE), 4);
        }
    }

    #[test]
    fn test_summary_lists_everything() {
        let mut rng = StepRng::new(0, 0);
        let bundle = generate_rewards(10, &RewardConstants::default(), &mut rng);
        let summary = bundle.summary();
        assert!(summary.contains("4500 XP"));
        assert!(summary.contains("Iron Gem x1"));
    }

    #[test]
    fn test_bundle_json_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bundle = generate_rewards(4, &RewardConstants::default(), &mut rng);
        let json = serde_json::to_string(&bundle).unwrap();
        let back: RewardBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
