//! Choice provider for player-controlled characters.
//!
//! The engine offers a list of options and expects an index back. Validating
//! and re-prompting on bad input is the provider's job; an out-of-range index
//! reaching the engine is a contract violation.

use std::collections::VecDeque;

use crate::character::Character;

/// One selectable move, as offered to a choice provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOption {
    /// Slot in the character's move set.
    pub slot: usize,
    pub name: String,
    pub description: String,
    pub remaining_uses: u32,
    pub max_uses: u32,
}

/// External source of move and target choices.
pub trait ChoiceProvider {
    /// Pick one of `options` (all usable) for `user`. Returns an index into `options`.
    fn choose_move(&mut self, user: &Character, options: &[MoveOption]) -> usize;

    /// Pick one of `candidates` as the target of `user`'s action. Returns an
    /// index into `candidates`.
    fn choose_target(&mut self, user: &Character, candidates: &[&Character]) -> usize;
}

impl<P: ChoiceProvider + ?Sized> ChoiceProvider for Box<P> {
    fn choose_move(&mut self, user: &Character, options: &[MoveOption]) -> usize {
        (**self).choose_move(user, options)
    }

    fn choose_target(&mut self, user: &Character, candidates: &[&Character]) -> usize {
        (**self).choose_target(user, candidates)
    }
}

/// Always picks the first option.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstChoice;

impl ChoiceProvider for FirstChoice {
    fn choose_move(&mut self, _user: &Character, _options: &[MoveOption]) -> usize {
        0
    }

    fn choose_target(&mut self, _user: &Character, _candidates: &[&Character]) -> usize {
        0
    }
}

/// Replays queued answers in order, then falls back to the first option.
#[derive(Clone, Debug, Default)]
pub struct ScriptedChoices {
    moves: VecDeque<usize>,
    targets: VecDeque<usize>,
}

impl ScriptedChoices {
    pub fn new(moves: impl IntoIterator<Item = usize>, targets: impl IntoIterator<Item = usize>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            targets: targets.into_iter().collect(),
        }
    }
}

impl ChoiceProvider for ScriptedChoices {
    fn choose_move(&mut self, _user: &Character, _options: &[MoveOption]) -> usize {
        self.moves.pop_front().unwrap_or(0)
    }

    fn choose_target(&mut self, _user: &Character, _candidates: &[&Character]) -> usize {
        self.targets.pop_front().unwrap_or(0)
    }
}
