//! One character's move for the current round.

use crate::action::{Action, ActionContext, ActionOutcome, ActionStatus, MoveOutcome};
use crate::character::CharacterId;
use crate::error::BattleError;
use crate::history::MoveRecord;

/// What happened when a move-use was resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum MoveUseResult {
    /// The move had no uses left; nothing ran.
    Unavailable,

    /// A use was spent and the success check ran. `actions` is empty unless
    /// `outcome` is a success.
    Resolved {
        outcome: MoveOutcome,
        actions: Vec<ActionOutcome>,
    },
}

impl MoveUseResult {
    pub fn outcome(&self) -> Option<MoveOutcome> {
        match self {
            Self::Unavailable => None,
            Self::Resolved { outcome, .. } => Some(*outcome),
        }
    }
}

/// A declared move waiting in the round's queue.
///
/// Created during the choice phase with its static targets already locked
/// in, then consumed by [`MoveUse::resolve`].
#[derive(Clone, Debug)]
pub struct MoveUse {
    user: CharacterId,
    slot: usize,
    move_name: String,
    priority: i32,
    actions: Vec<Action>,
}

impl MoveUse {
    /// Declares `ctx.user`'s move in `slot`.
    ///
    /// Every static action resolves its targets here, before success is
    /// rolled. Reactive actions wait for execution.
    pub fn declare(slot: usize, ctx: &mut ActionContext<'_>) -> Result<Self, BattleError> {
        let user = ctx.user;
        let mv = ctx.roster.require(user)?.move_at(slot)?;
        let move_name = mv.name().to_owned();
        let priority = mv.priority();
        let mut actions: Vec<Action> = mv.actions().iter().cloned().map(Action::new).collect();

        for action in actions.iter_mut() {
            if !action.config().targeting.is_reactive() {
                action.set_targets(ctx)?;
            }
        }

        tracing::debug!("{} declared '{}' (priority {})", user, move_name, priority);
        Ok(Self {
            user,
            slot,
            move_name,
            priority,
            actions,
        })
    }

    pub fn user(&self) -> CharacterId {
        self.user
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn move_name(&self) -> &str {
        &self.move_name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Spends a use, rolls success and, on success, runs every action in order.
    ///
    /// The success outcome is appended to the history after the actions run,
    /// so use-count calculators inside this move only see earlier uses.
    ///
    /// # Errors
    ///
    /// [`BattleError::TargetsNotSet`] if a static action reaches execution
    /// without targets.
    pub fn resolve(self, ctx: &mut ActionContext<'_>) -> Result<MoveUseResult, BattleError> {
        let mv = ctx.roster.require_mut(self.user)?.move_at_mut(self.slot)?;
        if !mv.consume_use() {
            tracing::warn!("{} has no uses left of '{}'", self.user, self.move_name);
            return Ok(MoveUseResult::Unavailable);
        }
        let success = mv.success();

        let outcome = success.calculate(&self.move_name, self.user, &*ctx.history, &mut *ctx.rng);
        tracing::debug!("{} used '{}': {:?}", self.user, self.move_name, outcome);

        let mut results = Vec::new();
        if outcome.is_success() {
            for mut action in self.actions {
                let result = action.use_action(ctx)?;
                if result.status == ActionStatus::TargetsUnset {
                    return Err(BattleError::TargetsNotSet {
                        action: action.config().kind.label().to_owned(),
                    });
                }
                results.push(result);
            }
        }

        ctx.history.record_move(MoveRecord {
            round: ctx.round,
            user: self.user,
            move_name: self.move_name,
            outcome,
        });

        Ok(MoveUseResult::Resolved {
            outcome,
            actions: results,
        })
    }
}
