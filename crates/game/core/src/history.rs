//! Battle-scoped, append-only record of what happened.
//!
//! History-dependent effects read from here: retaliation damage looks up the
//! last hit its user took, reactive targeting looks up who dealt it, and
//! use-count calculators count earlier outcomes of the same move. Entries are
//! only ever appended; nothing is edited or removed during a battle.

use std::collections::BTreeSet;

use crate::action::{MoveOutcome, TargetEffect};
use crate::character::CharacterId;

/// Where an executed action came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSource {
    /// One of the user's moves, by name.
    Move(String),
    /// The user's equipped item, by name.
    Item(String),
}

impl ActionSource {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }
}

/// One executed action and its per-target effects.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRecord {
    pub round: u32,
    pub user: CharacterId,
    pub source: ActionSource,
    pub tags: BTreeSet<String>,
    pub effects: Vec<TargetEffect>,
}

/// The success roll of one move-use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub round: u32,
    pub user: CharacterId,
    pub move_name: String,
    pub outcome: MoveOutcome,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HistoryEntry {
    Action(ActionRecord),
    Move(MoveRecord),
}

/// Which earlier outcomes a use-count calculator counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseCount {
    Successes,
    /// Misses and failures.
    Failures,
    #[default]
    All,
}

impl UseCount {
    pub fn matches(self, outcome: MoveOutcome) -> bool {
        match self {
            Self::Successes => outcome.is_success(),
            Self::Failures => !outcome.is_success(),
            Self::All => true,
        }
    }
}

/// The most recent hit a character actually took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceivedDamage {
    pub round: u32,
    pub source: CharacterId,
    pub amount: u32,
}

#[derive(Clone, Debug, Default)]
pub struct ActionHistory {
    entries: Vec<HistoryEntry>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.entries.push(HistoryEntry::Action(record));
    }

    pub fn record_move(&mut self, record: MoveRecord) {
        self.entries.push(HistoryEntry::Move(record));
    }

    /// Executed actions, oldest first.
    pub fn actions(&self) -> impl DoubleEndedIterator<Item = &ActionRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            HistoryEntry::Action(record) => Some(record),
            HistoryEntry::Move(_) => None,
        })
    }

    /// Executed actions carrying `tag`, oldest first.
    pub fn actions_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ActionRecord> {
        self.actions().filter(move |record| record.tags.contains(tag))
    }

    /// Last damage dealt to `target` by any move. Hits absorbed by a
    /// protector do not count.
    pub fn last_damage_received(&self, target: CharacterId) -> Option<ReceivedDamage> {
        self.actions()
            .rev()
            .filter(|record| record.source.is_move())
            .find_map(|record| {
                record.effects.iter().rev().find_map(|effect| match *effect {
                    TargetEffect::Damage {
                        target: hit,
                        amount,
                        intake,
                    } if hit == target && intake.is_applied() => Some(ReceivedDamage {
                        round: record.round,
                        source: record.user,
                        amount,
                    }),
                    _ => None,
                })
            })
    }

    /// Whoever dealt the last damage `target` received.
    pub fn last_attacker(&self, target: CharacterId) -> Option<CharacterId> {
        self.last_damage_received(target).map(|hit| hit.source)
    }

    /// How many earlier uses of `move_name` by `user` had an outcome `count` accepts.
    pub fn count_move_outcomes(&self, user: CharacterId, move_name: &str, count: UseCount) -> u32 {
        let total = self
            .entries
            .iter()
            .filter(|entry| match entry {
                HistoryEntry::Move(record) => {
                    record.user == user
                        && record.move_name == move_name
                        && count.matches(record.outcome)
                }
                HistoryEntry::Action(_) => false,
            })
            .count();
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}
