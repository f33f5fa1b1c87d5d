//! Structured round results for presentation.
//!
//! The engine never formats text. Each round produces a [`RoundReport`]
//! listing what happened in resolution order, and a [`PresentationSink`]
//! turns it into whatever the front end needs.

use crate::action::{ActionOutcome, ActionStatus, MoveOutcome, TargetEffect};
use crate::character::{CharacterId, DamageIntake, ProtectOutcome, Roster, Team};
use crate::history::ActionSource;
use crate::stats::StatDelta;

/// When an item action fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPhase {
    StartOfTurn,
    EndOfTurn,
}

/// Why a character did not act this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassReason {
    NoUsableMoves,
    /// Died earlier in the round, before its move came up.
    Dead,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleStatus {
    Ongoing,
    /// Only this team has living members.
    Won { team: Team },
    /// Nobody is left standing, or the round limit was reached.
    Draw,
}

impl BattleStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// One observable step of a round.
#[derive(Clone, Debug, PartialEq)]
pub enum BattleEvent {
    ItemTriggered {
        character: CharacterId,
        item: String,
        phase: ItemPhase,
    },
    MoveChosen {
        character: CharacterId,
        move_name: String,
    },
    /// The move ran out of uses before it resolved.
    MoveUnavailable {
        character: CharacterId,
        move_name: String,
    },
    MoveResolved {
        character: CharacterId,
        move_name: String,
        outcome: MoveOutcome,
    },
    Damaged {
        source: CharacterId,
        target: CharacterId,
        amount: u32,
    },
    /// A protector absorbed a hit meant for `target`.
    Protected {
        source: CharacterId,
        target: CharacterId,
        protector: CharacterId,
        amount: u32,
    },
    DamageFailed {
        source: CharacterId,
        target: CharacterId,
    },
    Healed {
        source: CharacterId,
        target: CharacterId,
        amount: u32,
    },
    Buffed {
        source: CharacterId,
        target: CharacterId,
        deltas: Vec<StatDelta>,
    },
    ProtectAdded {
        protector: CharacterId,
        target: CharacterId,
    },
    ProtectRejected {
        protector: CharacterId,
        target: CharacterId,
    },
    ProtectLimitChanged {
        target: CharacterId,
        delta: i32,
        limit: i32,
    },
    /// An action found nothing to act on.
    ActionSkipped {
        character: CharacterId,
        source: ActionSource,
        status: ActionStatus,
    },
    Died {
        character: CharacterId,
    },
    Passed {
        character: CharacterId,
        reason: PassReason,
    },
}

impl BattleEvent {
    pub fn from_effect(source: CharacterId, effect: &TargetEffect) -> Self {
        match *effect {
            TargetEffect::Damage {
                target,
                amount,
                intake,
            } => match intake {
                DamageIntake::Applied { amount } => Self::Damaged {
                    source,
                    target,
                    amount,
                },
                DamageIntake::Protected { by } => Self::Protected {
                    source,
                    target,
                    protector: by,
                    amount,
                },
            },
            TargetEffect::DamageFailed { target } => Self::DamageFailed { source, target },
            TargetEffect::Heal { target, amount } => Self::Healed {
                source,
                target,
                amount,
            },
            TargetEffect::Buff { target, ref deltas } => Self::Buffed {
                source,
                target,
                deltas: deltas.clone(),
            },
            TargetEffect::Protect {
                target,
                protector,
                outcome: ProtectOutcome::Added,
            } => Self::ProtectAdded { protector, target },
            TargetEffect::Protect {
                target,
                protector,
                outcome: ProtectOutcome::Rejected,
            } => Self::ProtectRejected { protector, target },
            TargetEffect::ProtectLimit {
                target,
                delta,
                limit,
            } => Self::ProtectLimitChanged {
                target,
                delta,
                limit,
            },
        }
    }
}

/// Appends the events of one action outcome.
pub(crate) fn push_outcome(
    events: &mut Vec<BattleEvent>,
    user: CharacterId,
    source: &ActionSource,
    outcome: &ActionOutcome,
) {
    if outcome.success() {
        events.extend(
            outcome
                .effects
                .iter()
                .map(|effect| BattleEvent::from_effect(user, effect)),
        );
    } else {
        events.push(BattleEvent::ActionSkipped {
            character: user,
            source: source.clone(),
            status: outcome.status,
        });
    }
}

/// Everything that happened in one round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    pub events: Vec<BattleEvent>,
    /// Status after the round ended.
    pub status: BattleStatus,
}

impl RoundReport {
    pub fn deaths(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::Died { character } => Some(*character),
            _ => None,
        })
    }

    /// Resolved moves in the order they ran.
    pub fn resolved_moves(&self) -> impl Iterator<Item = (CharacterId, &str, MoveOutcome)> + '_ {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::MoveResolved {
                character,
                move_name,
                outcome,
            } => Some((*character, move_name.as_str(), *outcome)),
            _ => None,
        })
    }
}

/// Receives round results for rendering.
pub trait PresentationSink {
    fn present(&mut self, report: &RoundReport, roster: &Roster);

    /// Called once after the final round.
    fn finish(&mut self, _status: &BattleStatus, _roster: &Roster) {}
}

/// Collects reports for later inspection.
impl PresentationSink for Vec<RoundReport> {
    fn present(&mut self, report: &RoundReport, _roster: &Roster) {
        self.push(report.clone());
    }
}
