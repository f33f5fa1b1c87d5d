//! Roster loader.
//!
//! Loads the characters of a battle from a RON list of `CharacterConfig`.

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{ActionConfig, ActionKind, CharacterConfig, StatKind};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<CharacterConfig>`
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, does not parse, or describes a
    /// roster that cannot fight (see [`RosterLoader::validate`]).
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterConfig>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterConfig>> {
        let roster: Vec<CharacterConfig> = parse_ron(content, "roster")?;
        Self::validate(&roster)?;
        Ok(roster)
    }

    /// Rejects rosters the engine would choke on.
    ///
    /// - fewer than two teams
    /// - a character without positive max health
    /// - a buff that names the same stat twice in one action
    pub fn validate(roster: &[CharacterConfig]) -> LoadResult<()> {
        let teams: BTreeSet<_> = roster.iter().map(|c| &c.team).collect();
        if teams.len() < 2 {
            anyhow::bail!("roster needs at least two teams, found {}", teams.len());
        }

        for character in roster {
            if character.max_health <= 0 {
                anyhow::bail!(
                    "character '{}' has non-positive max health {}",
                    character.name,
                    character.max_health
                );
            }

            let item_actions = character
                .item
                .iter()
                .flat_map(|item| item.start_of_turn.iter().chain(item.end_of_turn.iter()));
            let move_actions = character.moves.iter().flat_map(|m| m.actions.iter());

            for action in move_actions.chain(item_actions) {
                check_buff(&character.name, action)?;
            }
        }
        Ok(())
    }
}

fn check_buff(owner: &str, action: &ActionConfig) -> LoadResult<()> {
    let ActionKind::Buff(deltas) = &action.kind else {
        return Ok(());
    };
    let mut seen = BTreeSet::<StatKind>::new();
    for delta in deltas {
        if !seen.insert(delta.stat) {
            anyhow::bail!("character '{}' has a buff naming {} twice", owner, delta.stat);
        }
    }
    Ok(())
}
