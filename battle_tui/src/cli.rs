//! Command line arguments

use battle_core::config::{default_bosses, load_boss_roster, BattleConstants, BossRoster, ConfigError};
use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Terminal boss arena
#[derive(Parser, Debug)]
#[command(name = "battle_tui")]
#[command(about = "Fight the boss roster in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Battle constants TOML; built-in balance when omitted
    #[arg(long, value_name = "FILE")]
    pub constants: Option<PathBuf>,

    /// Boss roster TOML with [[bosses]] tables; built-in roster when omitted
    #[arg(long, value_name = "FILE")]
    pub bosses: Option<PathBuf>,

    /// Seed for the first battle; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that receives battle_tui.log
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub log_dir: PathBuf,
}

/// A file named on the command line could not be used
#[derive(Error, Debug)]
#[error("{path}: {source}")]
pub struct LoadError {
    pub path: String,
    #[source]
    pub source: ConfigError,
}

impl Cli {
    /// Load the files the user named, defaults for the rest
    ///
    /// An explicit path that fails to load is an error, never a silent fallback.
    pub fn load_config(&self) -> Result<(BattleConstants, BossRoster), LoadError> {
        let constants = match &self.constants {
            Some(path) => BattleConstants::load(path).map_err(|e| load_error(path, e))?,
            None => BattleConstants::default(),
        };
        let roster = match &self.bosses {
            Some(path) => load_boss_roster(path).map_err(|e| load_error(path, e))?,
            None => default_bosses(),
        };
        Ok((constants, roster))
    }
}

fn load_error(path: &Path, source: ConfigError) -> LoadError {
    LoadError {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_uses_defaults() {
        let cli = Cli::try_parse_from(["battle_tui"]).unwrap();
        let (constants, roster) = cli.load_config().unwrap();
        assert_eq!(constants, BattleConstants::default());
        assert_eq!(roster.len(), default_bosses().len());
        assert_eq!(cli.log_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let cli = Cli::try_parse_from(["battle_tui", "--bosses", "no/such/bosses.toml"]).unwrap();
        let err = cli.load_config().unwrap_err();
        assert_eq!(err.path, "no/such/bosses.toml");
        assert!(matches!(err.source, ConfigError::IoError(_)));
        assert!(err.to_string().starts_with("no/such/bosses.toml: "));
    }

    #[test]
    fn test_invalid_constants_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("battle_tui_constants_{}.toml", std::process::id()));
        std::fs::write(&path, "[log]\ncapacity = 0\n").unwrap();

        let cli = Cli::try_parse_from(["battle_tui", "--constants", path.to_str().unwrap(), "--seed", "9"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        let err = cli.load_config().unwrap_err();
        assert!(matches!(err.source, ConfigError::ValidationError(_)));

        std::fs::remove_file(&path).unwrap();
    }
}
