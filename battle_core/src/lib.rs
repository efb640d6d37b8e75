//! battle_core - Turn-based boss combat engine
//!
//! This library provides:
//! - Damage Resolver: player hits and boss strikes
//! - Status Effect Tracker: burn, poison and slow on the boss
//! - Combat State Machine: BattleSession and its transitions
//! - Reward Generator: the victory payout
//! - Pacing: a virtual-time driver for front ends

pub mod combat;
pub mod config;
pub mod damage;
pub mod effects;
pub mod pacing;
pub mod prelude;
pub mod reward;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    BattleEvent, BattleInput, BattleRecord, BattleSession, CombatState, FloatingValue, Rejection,
    StateDelta, Transition,
};
pub use config::{default_bosses, BattleConstants, BossRoster, ConfigError};
pub use damage::{resolve_boss_strike, resolve_damage, BossStrike, DamageRoll};
pub use effects::{EffectTracker, StatusEffect};
pub use pacing::{BattleDriver, BattleObserver, CombatLog, Scheduler};
pub use reward::{generate_rewards, RewardBundle, RewardStack};
pub use stats::{BossStats, ElementalAttack, PlayerStats};
pub use types::{EffectKind, Element, Outcome, PlayerAction, TurnOwner};
