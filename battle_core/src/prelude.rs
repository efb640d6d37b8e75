//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::stats::{BossStats, ElementalAttack, PlayerStats};
pub use crate::types::{EffectKind, Element, Outcome, PlayerAction, TurnOwner};

// Combat
pub use crate::combat::{BattleEvent, BattleInput, BattleSession, Rejection, Transition};

// Effects
pub use crate::effects::{EffectTracker, StatusEffect};

// Rewards
pub use crate::reward::RewardBundle;

// Pacing
pub use crate::pacing::{BattleDriver, BattleObserver};

// Config
pub use crate::config::{default_bosses, BattleConstants};
