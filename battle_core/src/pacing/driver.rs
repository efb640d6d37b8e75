//! BattleDriver - session, scheduler, log and observer wired together
//!
//! The driver resolves a player action at once, then schedules the boss reply
//! after the configured pacing delay. Front ends call `advance` with elapsed
//! frame time; tests call it with whatever time they like.

use super::log::CombatLog;
use super::scheduler::Scheduler;
use crate::combat::{
    BattleEvent, BattleRecord, BattleSession, FloatingValue, Rejection, StateDelta, Transition,
};
use crate::reward::RewardBundle;
use crate::types::{PlayerAction, TurnOwner};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Callbacks for everything a front end shows or persists
///
/// Every method has an empty default so observers only implement what they use.
pub trait BattleObserver {
    /// Fired exactly once per battle. On victory `rewards` is always present.
    fn on_complete(&mut self, _success: bool, _final_player_hp: u32, _rewards: Option<&RewardBundle>) {}

    /// Fired once when the battle view closes, finished or not
    fn on_close(&mut self) {}

    fn on_log_line(&mut self, _line: &str) {}

    fn on_floating_value(&mut self, _value: &FloatingValue) {}
}

/// Observer that ignores everything
impl BattleObserver for () {}

/// Work the driver schedules for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacedTask {
    BossReply,
}

pub struct BattleDriver<O: BattleObserver, R: Rng = ChaCha8Rng> {
    session: BattleSession<R>,
    observer: O,
    scheduler: Scheduler<PacedTask>,
    log: CombatLog,
    reply_delay: Duration,
    started: bool,
    closed: bool,
    disposed: bool,
}

impl<O: BattleObserver, R: Rng> BattleDriver<O, R> {
    pub fn new(session: BattleSession<R>, observer: O) -> Self {
        let constants = session.constants();
        let log = CombatLog::new(constants.log.capacity);
        let reply_delay = Duration::from_millis(constants.pacing.boss_reply_delay_ms);
        BattleDriver {
            session,
            observer,
            scheduler: Scheduler::new(),
            log,
            reply_delay,
            started: false,
            closed: false,
            disposed: false,
        }
    }

    /// Deliver the opening events (battle start, and completion if either
    /// side began at zero hp). Calling it again does nothing.
    ///
    /// `submit`, `advance`, `close` and `dispose` call this first, so the
    /// opening completion is never lost when a caller skips it.
    pub fn start(&mut self) -> Vec<BattleEvent> {
        if self.started || self.disposed {
            return Vec::new();
        }
        self.started = true;
        let events = self.session.take_pending_events();
        self.dispatch(&events);
        events
    }

    /// Resolve a player action now and queue the boss reply
    pub fn submit(&mut self, action: PlayerAction) -> Transition {
        if self.disposed {
            return self.disposed_transition();
        }
        self.start();

        let transition = self.session.act(action);
        if !transition.is_accepted() {
            return transition;
        }

        self.dispatch(&transition.events);
        if self.session.state().turn_owner == TurnOwner::Boss && !self.session.is_finished() {
            let id = self.scheduler.schedule(self.reply_delay, PacedTask::BossReply);
            debug!(?id, delay_ms = self.reply_delay.as_millis() as u64, "boss reply scheduled");
        }
        transition
    }

    /// Move battle time forward, running any replies that come due
    pub fn advance(&mut self, dt: Duration) -> Vec<Transition> {
        if self.disposed {
            return Vec::new();
        }
        self.start();

        let mut transitions = Vec::new();
        for task in self.scheduler.advance(dt) {
            match task {
                PacedTask::BossReply => {
                    let transition = self.session.boss_reply();
                    if transition.is_accepted() {
                        self.dispatch(&transition.events);
                    }
                    transitions.push(transition);
                }
            }
        }
        transitions
    }

    /// Close the battle view: `on_close` fires once, then the driver is disposed
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.start();
        info!(boss = %self.session.boss().name, finished = self.session.is_finished(), "battle closed");
        self.observer.on_close();
        self.dispose();
    }

    /// Cancel all scheduled work; later calls become no-ops
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.start();
        self.disposed = true;
        self.scheduler.cancel_all();
        debug!("battle driver disposed");
    }

    pub fn session(&self) -> &BattleSession<R> {
        &self.session
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Whether the boss reply is still waiting on the clock
    pub fn reply_pending(&self) -> bool {
        self.scheduler.pending() > 0
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn record(&self) -> BattleRecord {
        self.session.record()
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn disposed_transition(&self) -> Transition {
        let state = self.session.state();
        Transition::rejected(
            StateDelta {
                player_hp_before: state.player_hp,
                player_hp_after: state.player_hp,
                boss_hp_before: state.boss_hp,
                boss_hp_after: state.boss_hp,
                turn_owner: state.turn_owner,
                action_locked: state.action_locked,
                terminal: state.terminal,
            },
            Rejection::Disposed,
        )
    }

    fn dispatch(&mut self, events: &[BattleEvent]) {
        let now = self.scheduler.now();
        for event in events {
            if let Some(line) = event.log_line(&self.session.boss().name) {
                self.observer.on_log_line(&line);
                self.log.push(now, line);
            }
            if let Some(value) = event.floating_value() {
                self.observer.on_floating_value(&value);
            }
            if let BattleEvent::Completed {
                success,
                final_player_hp,
                rewards,
            } = event
            {
                self.observer.on_complete(*success, *final_player_hp, rewards.as_ref());
            }
        }
    }
}
