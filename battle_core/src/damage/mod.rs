//! Damage formulas - player hits and boss strikes

mod boss;
mod resolver;

pub use boss::{resolve_boss_strike, BossStrike};
pub use resolver::{elemental_bonus, resolve_damage, resolve_damage_with, roll_variance, DamageRoll};
