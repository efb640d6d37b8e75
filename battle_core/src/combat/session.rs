//! BattleSession - the combat state machine
//!
//! States run `PlayerTurn -> BossTurn -> PlayerTurn -> ...` until one side
//! reaches zero hp, then settle in `Victory` or `Defeat` for good.
//!
//! Each input produces a `Transition`. Invalid inputs (wrong turn, action in
//! flight, finished battle, missing element) are absorbed: the transition
//! carries a `Rejection`, no events, and the state is untouched.
//!
//! Round layout:
//! 1. Player action resolves, boss may die, lock engages, turn passes
//! 2. Boss strike resolves, defend stance clears, player may die
//! 3. Effects tick at the boss -> player boundary, boss may die
//! 4. Lock releases, turn passes back

use super::event::BattleEvent;
use super::record::BattleRecord;
use super::result::{Rejection, StateDelta, Transition};
use super::state::CombatState;
use crate::config::BattleConstants;
use crate::damage::{elemental_bonus, resolve_boss_strike, resolve_damage_with, DamageRoll};
use crate::effects::EffectTracker;
use crate::reward::{generate_rewards, RewardBundle};
use crate::stats::{BossStats, PlayerStats};
use crate::types::{Element, Outcome, PlayerAction, TurnOwner};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Inputs the state machine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", content = "action", rename_all = "snake_case")]
pub enum BattleInput {
    Player(PlayerAction),
    /// The paced boss reply to the last player action
    BossReply,
}

/// One battle between a player and a boss
#[derive(Debug, Clone)]
pub struct BattleSession<R: Rng = ChaCha8Rng> {
    player: PlayerStats,
    boss: BossStats,
    constants: BattleConstants,
    state: CombatState,
    rng: R,
    rewards: Option<RewardBundle>,
    completed: bool,
    /// Events raised at construction, not yet handed out
    pending: Vec<BattleEvent>,
}

impl BattleSession<ChaCha8Rng> {
    /// Create a replayable session from a seed
    pub fn seeded(player: PlayerStats, boss: BossStats, constants: BattleConstants, seed: u64) -> Self {
        Self::with_rng(player, boss, constants, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BattleSession<R> {
    /// Create a session drawing every random number from `rng`
    ///
    /// Player hp is clamped to max hp and the boss starts at full health.
    /// The termination check runs immediately, so a player starting at 0 hp
    /// is already defeated.
    ///
    /// `constants` must pass `BattleConstants::validate`; `load` and `parse`
    /// guarantee it, hand-built values are checked in debug builds.
    pub fn with_rng(mut player: PlayerStats, boss: BossStats, constants: BattleConstants, rng: R) -> Self {
        debug_assert!(
            constants.validate().is_ok(),
            "invalid battle constants: {:?}",
            constants.validate()
        );
        player.hp = player.hp.min(player.max_hp);
        let effects = EffectTracker::new(constants.effects.clone());
        let state = CombatState::new(player.hp, boss.max_hp, effects);

        debug!(
            boss = %boss.name,
            boss_level = boss.level,
            player_hp = player.hp,
            "battle session created"
        );

        let mut session = BattleSession {
            pending: vec![BattleEvent::BattleStarted {
                boss: boss.name.clone(),
                boss_level: boss.level,
            }],
            player,
            boss,
            constants,
            state,
            rng,
            rewards: None,
            completed: false,
        };

        let mut opening = Vec::new();
        session.check_terminal(&mut opening);
        session.pending.extend(opening);
        session
    }

    /// Feed one input to the state machine
    pub fn apply(&mut self, input: BattleInput) -> Transition {
        match input {
            BattleInput::Player(action) => self.act(action),
            BattleInput::BossReply => self.boss_reply(),
        }
    }

    /// Resolve a player action
    pub fn act(&mut self, action: PlayerAction) -> Transition {
        if let Some(reason) = self.player_rejection(action) {
            debug!(?action, %reason, "player action rejected");
            return Transition::rejected(self.snapshot_delta(), reason);
        }

        let before = self.snapshot();
        let mut events = std::mem::take(&mut self.pending);

        match action {
            PlayerAction::NormalAttack => {
                let roll = self.roll_player_hit(0.0);
                self.hit_boss(action, roll, roll.is_crit, &mut events);
                self.steal_life(roll.amount, &mut events);
            }
            PlayerAction::Defend => {
                self.state.is_defending = true;
                events.push(BattleEvent::DefendStance);
            }
            PlayerAction::ElementalAttack(element) => {
                let bonus = elemental_bonus(&self.constants.elements, &self.player.elemental, element);
                let roll = self.roll_player_hit(bonus);
                let display_crit = roll.is_crit || element == Element::Lightning;
                self.hit_boss(action, roll, display_crit, &mut events);

                if let Some(kind) = element.inflicts() {
                    let (effect, replaced) = self.state.effects.inflict(kind, self.boss.max_hp);
                    self.state.boss_attack_modifier = self.state.effects.attack_modifier();
                    events.push(BattleEvent::EffectApplied {
                        kind,
                        turns: effect.remaining_turns,
                        refreshed: replaced.is_some(),
                    });
                }

                if self.constants.elements.lifesteal_on_elemental {
                    self.steal_life(roll.amount, &mut events);
                }
            }
        }

        debug!(?action, boss_hp = self.state.boss_hp, "player action resolved");

        if !self.check_terminal(&mut events) {
            self.state.turn_owner = TurnOwner::Boss;
            self.state.action_locked = true;
        }

        self.transition(before, events)
    }

    /// Resolve the boss reply to the last player action
    pub fn boss_reply(&mut self) -> Transition {
        if self.state.is_finished() {
            return Transition::rejected(self.snapshot_delta(), Rejection::Finished);
        }
        if self.state.turn_owner != TurnOwner::Boss {
            debug!("boss reply rejected outside boss turn");
            return Transition::rejected(self.snapshot_delta(), Rejection::NotBossTurn);
        }

        let before = self.snapshot();
        let mut events = std::mem::take(&mut self.pending);

        let strike = resolve_boss_strike(
            &self.constants,
            self.boss.attack,
            self.state.boss_attack_modifier,
            self.player.defense,
            self.player.dodge_chance,
            self.state.is_defending,
            &mut self.rng,
        );
        self.state.is_defending = false;

        if strike.dodged {
            events.push(BattleEvent::BossMissed);
        } else {
            self.state.player_hp = self.state.player_hp.saturating_sub(strike.damage);
            events.push(BattleEvent::BossHit {
                damage: strike.damage,
                defended: strike.defended,
            });
        }

        debug!(
            damage = strike.damage,
            dodged = strike.dodged,
            player_hp = self.state.player_hp,
            "boss strike resolved"
        );

        if self.check_terminal(&mut events) {
            return self.transition(before, events);
        }

        let tick = self.state.effects.tick(&mut self.state.boss_hp);
        self.state.boss_attack_modifier = self.state.effects.attack_modifier();
        if !tick.is_empty() {
            debug!(
                damage = tick.total_damage,
                expired = tick.expired.len(),
                boss_hp = self.state.boss_hp,
                "effects ticked"
            );
        }
        for (kind, damage) in tick.damage_by_kind {
            events.push(BattleEvent::EffectTicked { kind, damage });
        }
        for kind in tick.expired {
            events.push(BattleEvent::EffectExpired { kind });
        }

        if !self.check_terminal(&mut events) {
            self.state.turn_owner = TurnOwner::Player;
            self.state.action_locked = false;
            self.state.round += 1;
        }

        self.transition(before, events)
    }

    /// Hand out events raised outside a transition (the opening check)
    pub fn take_pending_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn player(&self) -> &PlayerStats {
        &self.player
    }

    pub fn boss(&self) -> &BossStats {
        &self.boss
    }

    pub fn constants(&self) -> &BattleConstants {
        &self.constants
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.terminal
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Rewards, once a victory has been reached
    pub fn rewards(&self) -> Option<&RewardBundle> {
        self.rewards.as_ref()
    }

    /// Whether a player action would be accepted right now
    pub fn can_act(&self) -> bool {
        self.state.accepts_player_action()
    }

    /// Elemental actions the player can use; others are unavailable
    pub fn available_elements(&self) -> Vec<Element> {
        self.player.elemental.available()
    }

    /// Summary of the battle for the caller to keep
    pub fn record(&self) -> BattleRecord {
        BattleRecord {
            boss: self.boss.name.clone(),
            boss_level: self.boss.level,
            outcome: self.state.terminal,
            rounds: self.state.round,
            final_player_hp: self.state.player_hp,
            final_boss_hp: self.state.boss_hp,
            rewards: self.rewards.clone(),
        }
    }

    fn player_rejection(&self, action: PlayerAction) -> Option<Rejection> {
        if self.state.is_finished() {
            return Some(Rejection::Finished);
        }
        if self.state.action_locked {
            return Some(Rejection::Locked);
        }
        if self.state.turn_owner != TurnOwner::Player {
            return Some(Rejection::NotPlayerTurn);
        }
        if let PlayerAction::ElementalAttack(element) = action {
            if !self.player.elemental.has(element) {
                return Some(Rejection::ElementUnavailable(element));
            }
        }
        None
    }

    fn roll_player_hit(&mut self, bonus: f64) -> DamageRoll {
        resolve_damage_with(
            &self.constants.damage,
            self.player.attack as f64,
            self.boss.defense as f64,
            self.player.crit_chance,
            self.player.crit_damage,
            bonus,
            &mut self.rng,
        )
    }

    fn hit_boss(&mut self, action: PlayerAction, roll: DamageRoll, display_crit: bool, events: &mut Vec<BattleEvent>) {
        self.state.boss_hp = self.state.boss_hp.saturating_sub(roll.amount);
        events.push(BattleEvent::PlayerHit {
            action,
            damage: roll.amount,
            is_crit: display_crit,
        });
    }

    fn steal_life(&mut self, damage: u32, events: &mut Vec<BattleEvent>) {
        if self.player.life_steal <= 0.0 {
            return;
        }
        let wanted = (damage as f64 * self.player.life_steal / 100.0).floor() as u32;
        let room = self.player.max_hp - self.state.player_hp;
        let healed = wanted.min(room);
        if healed > 0 {
            self.state.player_hp += healed;
            events.push(BattleEvent::LifeStolen { amount: healed });
        }
    }

    /// Enter a terminal state if either side is at zero
    ///
    /// Returns true when the battle is over. Completion (with rewards on a
    /// victory) is emitted only on the first entry.
    fn check_terminal(&mut self, events: &mut Vec<BattleEvent>) -> bool {
        if self.state.terminal.is_some() {
            return true;
        }

        let outcome = if self.state.player_hp == 0 {
            Outcome::Defeat
        } else if self.state.boss_hp == 0 {
            Outcome::Victory
        } else {
            return false;
        };

        self.state.terminal = Some(outcome);
        self.state.action_locked = false;
        self.state.is_defending = false;

        if outcome.is_victory() {
            self.rewards = Some(generate_rewards(self.boss.level, &self.constants.rewards, &mut self.rng));
            events.push(BattleEvent::Victory);
        } else {
            events.push(BattleEvent::Defeat);
        }

        if !self.completed {
            self.completed = true;
            events.push(BattleEvent::Completed {
                success: outcome.is_victory(),
                final_player_hp: self.state.player_hp,
                rewards: self.rewards.clone(),
            });
        }

        info!(
            boss = %self.boss.name,
            ?outcome,
            rounds = self.state.round,
            player_hp = self.state.player_hp,
            "battle finished"
        );
        true
    }

    fn snapshot(&self) -> (u32, u32) {
        (self.state.player_hp, self.state.boss_hp)
    }

    fn snapshot_delta(&self) -> StateDelta {
        self.delta_from(self.snapshot())
    }

    fn delta_from(&self, (player_before, boss_before): (u32, u32)) -> StateDelta {
        StateDelta {
            player_hp_before: player_before,
            player_hp_after: self.state.player_hp,
            boss_hp_before: boss_before,
            boss_hp_after: self.state.boss_hp,
            turn_owner: self.state.turn_owner,
            action_locked: self.state.action_locked,
            terminal: self.state.terminal,
        }
    }

    fn transition(&self, before: (u32, u32), events: Vec<BattleEvent>) -> Transition {
        Transition {
            delta: self.delta_from(before),
            events,
            rejection: None,
        }
    }
}
