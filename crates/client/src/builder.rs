//! Battle builder with dependency injection pattern.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{ConfigLoader, RosterLoader, default_roster};
use battle_core::{Battle, BattleConfig, CharacterConfig, ChoiceProvider, RandomSource};

use crate::config::CliConfig;

/// Assembles a [`Battle`] from files, environment settings and injected
/// collaborators.
///
/// Roster and config fall back to the built-in roster and
/// [`BattleConfig::default`]. Explicit values win over file paths, and the
/// seed and round overrides are applied last.
#[derive(Default)]
pub struct BattleBuilder {
    roster: Option<Vec<CharacterConfig>>,
    roster_path: Option<PathBuf>,
    config: Option<BattleConfig>,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    max_rounds: Option<u32>,
    rng: Option<Box<dyn RandomSource>>,
    choices: Option<Box<dyn ChoiceProvider>>,
}

impl BattleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths and overrides from the CLI environment.
    pub fn from_cli(cli: &CliConfig) -> Self {
        Self {
            roster_path: cli.roster_path.clone(),
            config_path: cli.config_path.clone(),
            seed: cli.seed,
            max_rounds: cli.max_rounds,
            ..Self::default()
        }
    }

    pub fn roster(mut self, roster: Vec<CharacterConfig>) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn roster_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.roster_path = Some(path.into());
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Replace the seeded PCG source, e.g. with a scripted stream.
    pub fn random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set the provider that answers for player-controlled characters.
    pub fn choices(mut self, choices: impl ChoiceProvider + 'static) -> Self {
        self.choices = Some(Box::new(choices));
        self
    }

    /// Build the Battle.
    ///
    /// # Errors
    ///
    /// Returns an error if a roster or config file cannot be loaded.
    pub fn build(self) -> Result<Battle> {
        let mut config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => ConfigLoader::load(&path)
                .with_context(|| format!("Failed to load battle config from {}", path.display()))?,
            (None, None) => BattleConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_rounds) = self.max_rounds {
            config.max_rounds = max_rounds;
        }

        let roster = match (self.roster, self.roster_path) {
            (Some(roster), _) => roster,
            (None, Some(path)) => RosterLoader::load(&path)
                .with_context(|| format!("Failed to load roster from {}", path.display()))?,
            (None, None) => default_roster(),
        };

        tracing::debug!(
            "Assembling battle: {} characters, seed {}, max {} rounds",
            roster.len(),
            config.seed,
            config.max_rounds
        );

        let mut battle = Battle::from_configs(roster, config);
        if let Some(rng) = self.rng {
            battle = battle.with_random(rng);
        }
        if let Some(choices) = self.choices {
            battle = battle.with_choices(choices);
        }
        Ok(battle)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use battle_core::{BattleStatus, FirstChoice};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_to_builtin_roster() {
        let battle = BattleBuilder::new().seed(9).build().unwrap();

        assert_eq!(battle.roster().len(), default_roster().len());
        assert_eq!(battle.config().seed, 9);
        assert_eq!(battle.config().max_rounds, BattleConfig::DEFAULT_MAX_ROUNDS);
    }

    #[test]
    fn overrides_apply_on_top_of_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("battle.toml");
        fs::write(&path, "max_rounds = 40\nseed = 1\n").unwrap();

        let battle = BattleBuilder::new()
            .config_path(&path)
            .seed(77)
            .build()
            .unwrap();

        assert_eq!(battle.config().max_rounds, 40);
        assert_eq!(battle.config().seed, 77);
    }

    #[test]
    fn missing_roster_file_reports_path() {
        let err = BattleBuilder::new()
            .roster_path("/nonexistent/roster.ron")
            .build()
            .err()
            .unwrap();

        assert!(format!("{err:#}").contains("/nonexistent/roster.ron"));
    }

    #[test]
    fn built_battle_runs_with_injected_choices() {
        let mut battle = BattleBuilder::new()
            .seed(3)
            .max_rounds(5)
            .choices(FirstChoice)
            .build()
            .unwrap();
        let mut reports = Vec::new();

        let status = battle.run(&mut reports).unwrap();

        assert_ne!(status, BattleStatus::Ongoing);
        assert!(reports.len() <= 5);
    }
}
