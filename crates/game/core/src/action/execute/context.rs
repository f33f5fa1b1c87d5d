//! Execution context shared by targeting, calculators and effects.

use crate::character::{CharacterId, Roster};
use crate::env::{ChoiceProvider, RandomSource};
use crate::history::{ActionHistory, ActionSource};

// ============================================================================
// Action Context
// ============================================================================

/// Everything one action needs while it runs.
///
/// The battle owns the roster, the history and the collaborators; the context
/// only borrows them for the duration of one move-use or item trigger.
pub struct ActionContext<'a> {
    /// Round number, starting at 1.
    pub round: u32,

    /// The character performing the action.
    pub user: CharacterId,

    /// The move or item the action belongs to.
    pub source: ActionSource,

    /// Every character in the battle, dead ones included.
    pub roster: &'a mut Roster,

    /// Battle-scoped log, appended to after each action.
    pub history: &'a mut ActionHistory,

    /// Random source for accuracy rolls and random targeting.
    pub rng: &'a mut dyn RandomSource,

    /// Input collaborator for player-controlled users.
    pub choices: Option<&'a mut dyn ChoiceProvider>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        round: u32,
        user: CharacterId,
        source: ActionSource,
        roster: &'a mut Roster,
        history: &'a mut ActionHistory,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            round,
            user,
            source,
            roster,
            history,
            rng,
            choices: None,
        }
    }

    pub fn with_choices(mut self, choices: Option<&'a mut dyn ChoiceProvider>) -> Self {
        self.choices = choices;
        self
    }
}
