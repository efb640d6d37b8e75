//! Pacing - virtual-time scheduling between player actions and boss replies

mod driver;
mod log;
mod scheduler;

pub use driver::{BattleDriver, BattleObserver, PacedTask};
pub use log::{CombatLog, LogEntry};
pub use scheduler::{Scheduler, TaskId};
