//! Combat State Machine - turn order, action resolution, termination

mod event;
mod record;
mod result;
mod session;
mod state;

pub use event::{Anchor, BattleEvent, FloatColor, FloatingValue};
pub use record::BattleRecord;
pub use result::{Rejection, StateDelta, Transition};
pub use session::{BattleInput, BattleSession};
pub use state::CombatState;
