//! Battle client binary.
//!
//! Runs one battle to completion and prints it round by round.
//!
//! # Examples
//!
//! ```bash
//! # Built-in roster, random seed
//! cargo run -p battle-cli
//!
//! # Reproducible run from data files, playing the hero yourself
//! BATTLE_SEED=7 BATTLE_ROSTER=crates/game/content/data/roster.ron \
//!     BATTLE_INTERACTIVE=1 cargo run -p battle-cli
//! ```

use anyhow::Result;
use battle_cli::{BattleBuilder, CliConfig, StdinChoiceProvider, TextPresenter};
use battle_core::GameError;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = CliConfig::from_env();
    let seed = cli.seed.unwrap_or_else(rand::random);

    tracing::info!("Starting battle");
    tracing::info!("Seed: {}", seed);
    tracing::info!("Interactive: {}", cli.interactive);

    let mut builder = BattleBuilder::from_cli(&cli).seed(seed);
    if cli.interactive {
        builder = builder.choices(StdinChoiceProvider::new());
    }
    let mut battle = builder.build()?;

    let mut presenter = TextPresenter::stdout();
    let status = battle.run(&mut presenter).inspect_err(|e| {
        tracing::error!(
            "Battle aborted in round {} [{} {}]: {}",
            battle.round(),
            e.severity().as_str(),
            e.error_code(),
            e
        );
    })?;

    tracing::info!("Battle over after {} rounds: {:?}", battle.round(), status);
    Ok(())
}
