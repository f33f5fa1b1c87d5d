//! CLI runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Settings that decide which battle the binary runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// RNG seed. Drawn from the OS when unset.
    pub seed: Option<u64>,
    /// Overrides the round limit from the battle config.
    pub max_rounds: Option<u32>,
    /// RON roster. The built-in roster is used when unset.
    pub roster_path: Option<PathBuf>,
    /// TOML battle config. Defaults apply when unset.
    pub config_path: Option<PathBuf>,
    /// Read player choices from stdin.
    pub interactive: bool,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - RNG seed (default: random)
    /// - `BATTLE_MAX_ROUNDS` - Round limit before a draw (default: config file or 100)
    /// - `BATTLE_ROSTER` - Path to a RON roster (default: built-in roster)
    /// - `BATTLE_CONFIG` - Path to a TOML battle config (default: built-in defaults)
    /// - `BATTLE_INTERACTIVE` - Drive player characters from stdin (default: false)
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self {
            seed: read_env::<u64>("BATTLE_SEED"),
            max_rounds: read_env::<u32>("BATTLE_MAX_ROUNDS").map(|rounds| rounds.max(1)),
            roster_path: env::var("BATTLE_ROSTER").ok().map(PathBuf::from),
            config_path: env::var("BATTLE_CONFIG").ok().map(PathBuf::from),
            interactive: false,
        };

        if let Some(enable) = read_env::<bool>("BATTLE_INTERACTIVE") {
            config.interactive = enable;
        } else if env::var("BATTLE_INTERACTIVE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.interactive = true;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
