//! BattleRecord - what the caller keeps once a battle is over

use crate::reward::RewardBundle;
use crate::types::Outcome;
use serde::{Deserialize, Serialize};

/// Summary of one battle
///
/// `outcome` stays `None` for a battle that was closed before it finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub boss: String,
    pub boss_level: u32,
    pub outcome: Option<Outcome>,
    pub rounds: u32,
    pub final_player_hp: u32,
    pub final_boss_hp: u32,
    pub rewards: Option<RewardBundle>,
}

impl BattleRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn summary(&self) -> String {
        let result = match self.outcome {
            Some(Outcome::Victory) => "Victory",
            Some(Outcome::Defeat) => "Defeat",
            None => "Abandoned",
        };
        let mut line = format!(
            "{} vs {} (Lv.{}) after {} rounds",
            result, self.boss, self.boss_level, self.rounds
        );
        if let Some(rewards) = &self.rewards {
            line.push_str(&format!(": {}", rewards.summary()));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BattleRecord {
        BattleRecord {
            boss: "Lantern Wraith".to_string(),
            boss_level: 7,
            outcome: Some(Outcome::Defeat),
            rounds: 4,
            final_player_hp: 0,
            final_boss_hp: 312,
            rewards: None,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let json = record().to_json().unwrap();
        assert!(json.contains("\"defeat\""));
        assert_eq!(BattleRecord::from_json(&json).unwrap(), record());
    }

    #[test]
    fn test_summary() {
        assert_eq!(record().summary(), "Defeat vs Lantern Wraith (Lv.7) after 4 rounds");

        let mut open = record();
        open.outcome = None;
        assert!(open.summary().starts_with("Abandoned"));
    }
}
