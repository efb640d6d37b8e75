//! Application state

use battle_core::combat::{BattleRecord, BattleSession, FloatingValue};
use battle_core::config::{BattleConstants, BossRoster};
use battle_core::pacing::{BattleDriver, BattleObserver};
use battle_core::reward::RewardBundle;
use battle_core::stats::{BossStats, ElementalAttack, PlayerStats};
use battle_core::types::{Element, PlayerAction};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;
use tracing::{debug, info};

/// How long a floating number stays on screen
pub const FLOAT_LIFETIME: Duration = Duration::from_millis(1500);

/// Completion payload as the observer received it
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub success: bool,
    pub final_player_hp: u32,
    pub rewards: Option<RewardBundle>,
}

/// Collects driver callbacks until the app picks them up
#[derive(Debug, Default)]
pub struct ArenaObserver {
    pub fresh_floats: Vec<FloatingValue>,
    pub completion: Option<Completion>,
    pub closed: bool,
}

impl BattleObserver for ArenaObserver {
    fn on_complete(&mut self, success: bool, final_player_hp: u32, rewards: Option<&RewardBundle>) {
        self.completion = Some(Completion {
            success,
            final_player_hp,
            rewards: rewards.cloned(),
        });
    }

    fn on_close(&mut self) {
        self.closed = true;
    }

    fn on_floating_value(&mut self, value: &FloatingValue) {
        self.fresh_floats.push(*value);
    }
}

/// Everything the player has banked across battles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Purse {
    pub experience: u64,
    pub gold: u64,
    pub items: BTreeMap<String, u32>,
}

impl Purse {
    pub fn deposit(&mut self, rewards: &RewardBundle) {
        self.experience += rewards.experience;
        self.gold += rewards.gold;
        for stack in rewards.items.iter().chain(rewards.gems.iter()) {
            *self.items.entry(stack.name.clone()).or_insert(0) += stack.quantity;
        }
    }
}

pub struct App {
    pub roster: BossRoster,
    pub boss_index: usize,
    pub player: PlayerStats,
    pub driver: BattleDriver<ArenaObserver>,
    /// Floating numbers with the battle time they appeared
    pub floats: VecDeque<(Duration, FloatingValue)>,
    pub history: Vec<BattleRecord>,
    pub purse: Purse,
    pub show_help: bool,
    pub should_quit: bool,
    constants: BattleConstants,
    next_seed: u64,
}

impl App {
    pub fn new(roster: BossRoster, constants: BattleConstants, seed: u64) -> Self {
        let player = default_player();
        let boss = pick_boss(&roster, 0);
        let driver = new_driver(player.clone(), boss, constants.clone(), seed);

        let mut app = App {
            roster,
            boss_index: 0,
            player,
            driver,
            floats: VecDeque::new(),
            history: Vec::new(),
            purse: Purse::default(),
            show_help: false,
            should_quit: false,
            constants,
            next_seed: seed.wrapping_add(1),
        };
        app.driver.start();
        app.collect();
        app
    }

    pub fn attack(&mut self) {
        self.submit(PlayerAction::NormalAttack);
    }

    pub fn defend(&mut self) {
        self.submit(PlayerAction::Defend);
    }

    /// Elemental action by its slot (0 = fire .. 3 = poison)
    pub fn elemental(&mut self, slot: usize) {
        if let Some(element) = Element::all().get(slot) {
            self.submit(PlayerAction::ElementalAttack(*element));
        }
    }

    /// Feed elapsed frame time to the driver
    pub fn tick(&mut self, elapsed: Duration) {
        self.driver.advance(elapsed);
        self.collect();

        let now = self.driver.now();
        while let Some((at, _)) = self.floats.front() {
            if now.saturating_sub(*at) < FLOAT_LIFETIME {
                break;
            }
            self.floats.pop_front();
        }
    }

    /// Leave the current fight and face the next boss in the roster
    pub fn next_boss(&mut self) {
        self.boss_index = (self.boss_index + 1) % self.roster.len().max(1);
        self.restart();
    }

    /// Close the current fight and start a fresh one against the same boss
    pub fn restart(&mut self) {
        self.finish_current();

        let boss = pick_boss(&self.roster, self.boss_index);
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.driver = new_driver(self.player.clone(), boss, self.constants.clone(), seed);
        self.floats.clear();
        self.driver.start();
        self.collect();
    }

    /// Close the battle view and stop the app
    pub fn quit(&mut self) {
        self.finish_current();
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.driver.observer().completion.as_ref()
    }

    pub fn boss(&self) -> &BossStats {
        self.driver.session().boss()
    }

    fn submit(&mut self, action: PlayerAction) {
        let transition = self.driver.submit(action);
        if let Some(reason) = transition.rejection {
            debug!(%reason, "input ignored");
        }
        self.collect();
    }

    /// Move observer output into app state
    fn collect(&mut self) {
        let now = self.driver.now();
        let observer = self.driver.observer_mut();
        for value in observer.fresh_floats.drain(..) {
            self.floats.push_back((now, value));
        }
    }

    fn finish_current(&mut self) {
        if self.driver.is_closed() {
            return;
        }
        self.driver.close();

        let record = self.driver.record();
        if let Some(rewards) = &record.rewards {
            self.purse.deposit(rewards);
        }
        info!(record = %record.summary(), "battle archived");
        self.history.push(record);
    }
}

fn default_player() -> PlayerStats {
    let mut player = PlayerStats::new(640, 62, 24)
        .with_elemental(ElementalAttack {
            fire: 18,
            ice: 12,
            lightning: 9,
            poison: 14,
        })
        .with_crit(15.0, 50.0)
        .with_life_steal(4.0)
        .with_dodge(8.0);
    player.speed = 110;
    player.combat_power = 1480;
    player
}

fn pick_boss(roster: &BossRoster, index: usize) -> BossStats {
    roster
        .bosses
        .get(index)
        .map(|entry| entry.stats())
        .unwrap_or_else(|| BossStats::new("Training Dummy", 1, 300, 12, 0))
}

fn new_driver(player: PlayerStats, boss: BossStats, constants: BattleConstants, seed: u64) -> BattleDriver<ArenaObserver> {
    let session = BattleSession::seeded(player, boss, constants, seed);
    BattleDriver::new(session, ArenaObserver::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::config::default_bosses;
    use battle_core::types::TurnOwner;

    fn app() -> App {
        App::new(default_bosses(), BattleConstants::default(), 7)
    }

    #[test]
    fn test_attack_then_boss_replies() {
        let mut app = app();
        app.attack();
        assert_eq!(app.driver.session().state().turn_owner, TurnOwner::Boss);
        assert!(!app.floats.is_empty());

        app.tick(Duration::from_millis(1000));
        assert_eq!(app.driver.session().state().turn_owner, TurnOwner::Player);
    }

    #[test]
    fn test_floats_expire() {
        let mut app = app();
        app.defend();
        app.tick(Duration::from_millis(1000));
        assert!(!app.floats.is_empty());
        app.tick(Duration::from_millis(2000));
        assert!(app.floats.is_empty());
    }

    #[test]
    fn test_next_boss_archives_fight() {
        let mut app = app();
        let first = app.boss().name.clone();
        app.next_boss();

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].boss, first);
        assert_eq!(app.history[0].outcome, None);
        assert_ne!(app.boss().name, first);
    }

    #[test]
    fn test_victory_banks_rewards() {
        let mut roster = default_bosses();
        roster.bosses[0].max_hp = 1;
        let mut app = App::new(roster, BattleConstants::default(), 3);
        app.attack();

        let completion = app.completion().cloned().unwrap();
        assert!(completion.success);
        app.quit();

        assert!(app.should_quit);
        assert_eq!(app.purse.experience, completion.rewards.unwrap().experience);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_purse_accumulates() {
        let mut purse = Purse::default();
        let bundle = RewardBundle {
            experience: 10,
            gold: 5,
            items: vec![battle_core::reward::RewardStack::new("Refining Stone", 2)],
            gems: vec![battle_core::reward::RewardStack::new("Wooden Gem", 1)],
        };
        purse.deposit(&bundle);
        purse.deposit(&bundle);
        assert_eq!(purse.gold, 10);
        assert_eq!(purse.items["Refining Stone"], 4);
        assert_eq!(purse.items["Wooden Gem"], 2);
    }
}
