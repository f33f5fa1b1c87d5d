//! Targeting system for actions.
//!
//! A [`TargetCalculator`] decides who an action affects. Calculators come in
//! two timings:
//! - **Static**: resolved once when the move is declared, before the success
//!   roll. Later actions in the round cannot change the choice.
//! - **Reactive**: resolved when the action executes, so it sees everything
//!   that happened earlier in the round.
//!
//! The timing is carried by [`TargetResolution`], which the action stores
//! between declaration and use.
//!
//! Failure (`success == false`) means no valid candidate exists. It is never
//! an error; the action just does nothing.

use crate::action::execute::ActionContext;
use crate::character::{Character, CharacterId, Roster};
use crate::env::{ChoiceProvider, RandomSource};
use crate::error::BattleError;

// ============================================================================
// Target Calculator
// ============================================================================

/// How an action selects targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCalculator {
    /// The user only.
    User,

    /// Every other character, allies included.
    AllOthers,

    /// Every member of the user's team, the user included.
    UserTeam,

    /// One living ally other than the user.
    SingleAlly,

    /// One living enemy.
    SingleEnemy,

    /// One living character other than the user, drawn from the random source.
    RandomOther,

    /// One living character other than the user, picked by the controller.
    Chosen,

    /// Whoever last damaged the user. Reactive.
    LastAttacker,
}

/// Targets picked by a calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSelection {
    pub success: bool,
    pub targets: Vec<CharacterId>,
}

impl TargetSelection {
    pub fn found(targets: Vec<CharacterId>) -> Self {
        Self {
            success: !targets.is_empty(),
            targets,
        }
    }

    pub fn none() -> Self {
        Self {
            success: false,
            targets: Vec::new(),
        }
    }
}

impl TargetCalculator {
    /// Returns true if targets are resolved at execution time.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Self::LastAttacker)
    }

    /// Resolves targets against the current battle state.
    pub fn calculate(&self, ctx: &mut ActionContext<'_>) -> Result<TargetSelection, BattleError> {
        let user_id = ctx.user;
        let roster: &Roster = &*ctx.roster;
        let user = roster.require(user_id)?;

        let selection = match self {
            Self::User => TargetSelection::found(vec![user_id]),
            Self::AllOthers => TargetSelection::found(roster.others(user_id)),
            Self::UserTeam => TargetSelection::found(
                roster
                    .iter()
                    .filter(|c| c.is_ally_of(user))
                    .map(Character::id)
                    .collect(),
            ),
            Self::SingleAlly => {
                let candidates = living_others(roster, user, |c| c.is_ally_of(user));
                pick_one(user, candidates, &mut *ctx.rng, &mut ctx.choices)?
            }
            Self::SingleEnemy => {
                let candidates = living_others(roster, user, |c| !c.is_ally_of(user));
                pick_one(user, candidates, &mut *ctx.rng, &mut ctx.choices)?
            }
            Self::RandomOther => {
                let candidates = living_others(roster, user, |_| true);
                match roll_index(&mut *ctx.rng, candidates.len()) {
                    Some(index) => {
                        let chosen = candidates.get(index).ok_or(BattleError::InvalidChoice {
                            index,
                            len: candidates.len(),
                        })?;
                        TargetSelection::found(vec![chosen.id()])
                    }
                    None => TargetSelection::none(),
                }
            }
            Self::Chosen => {
                let candidates = living_others(roster, user, |_| true);
                pick_one(user, candidates, &mut *ctx.rng, &mut ctx.choices)?
            }
            Self::LastAttacker => match ctx.history.last_attacker(user_id) {
                Some(attacker) => TargetSelection::found(vec![attacker]),
                None => TargetSelection::none(),
            },
        };

        tracing::debug!(
            "{:?} for {} -> success={} targets={:?}",
            self,
            user_id,
            selection.success,
            selection.targets
        );
        Ok(selection)
    }

    /// Captures targets at declaration time.
    ///
    /// Static calculators resolve immediately; reactive ones defer.
    pub fn declare(&self, ctx: &mut ActionContext<'_>) -> Result<TargetResolution, BattleError> {
        if self.is_reactive() {
            return Ok(TargetResolution::Reactive(*self));
        }
        let selection = self.calculate(ctx)?;
        Ok(TargetResolution::Static(selection))
    }
}

fn living_others<'r, F>(roster: &'r Roster, user: &Character, keep: F) -> Vec<&'r Character>
where
    F: Fn(&Character) -> bool,
{
    roster
        .iter()
        .filter(|c| c.id() != user.id() && c.is_alive() && keep(*c))
        .collect()
}

fn roll_index(rng: &mut dyn RandomSource, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let bound = u32::try_from(len).unwrap_or(u32::MAX);
    Some(rng.next_in_range(0, bound) as usize)
}

/// Player-controlled users ask the choice provider; scripted users roll.
fn pick_one<'c>(
    user: &Character,
    candidates: Vec<&Character>,
    rng: &mut dyn RandomSource,
    choices: &mut Option<&'c mut dyn ChoiceProvider>,
) -> Result<TargetSelection, BattleError> {
    match candidates.len() {
        0 => return Ok(TargetSelection::none()),
        1 => return Ok(TargetSelection::found(vec![candidates[0].id()])),
        _ => {}
    }

    let index = match choices.as_mut() {
        Some(provider) if user.controller().is_player() => {
            provider.choose_target(user, &candidates)
        }
        _ => roll_index(rng, candidates.len()).unwrap_or(0),
    };

    let chosen = candidates.get(index).ok_or(BattleError::InvalidChoice {
        index,
        len: candidates.len(),
    })?;
    Ok(TargetSelection::found(vec![chosen.id()]))
}

// ============================================================================
// Target Resolution
// ============================================================================

/// Targets as stored on an action between declaration and use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetResolution {
    /// Locked in at declaration time.
    Static(TargetSelection),

    /// Resolved when the action executes.
    Reactive(TargetCalculator),
}

impl TargetResolution {
    /// Produces the final target list at execution time.
    pub fn resolve(self, ctx: &mut ActionContext<'_>) -> Result<TargetSelection, BattleError> {
        match self {
            Self::Static(selection) => Ok(selection),
            Self::Reactive(calculator) => calculator.calculate(ctx),
        }
    }
}
