//! Action result types.
//!
//! - `TargetEffect`: what one action did to one target
//! - `ActionStatus`: whether the action ran at all
//! - `ActionOutcome`: the full result of one `Action::use_action` call

use std::collections::BTreeSet;

use crate::character::{CharacterId, DamageIntake, ProtectOutcome};
use crate::stats::StatDelta;

// ============================================================================
// Target Effect
// ============================================================================

/// The effect one action had on one target.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetEffect {
    /// A hit landed, either on health or on a protector.
    Damage {
        target: CharacterId,
        /// Amount the calculator produced.
        amount: u32,
        intake: DamageIntake,
    },

    /// The damage calculator failed for this target; nothing happened.
    DamageFailed { target: CharacterId },

    /// Health restored (already clamped to the target's missing health).
    Heal { target: CharacterId, amount: u32 },

    /// Stat multipliers changed.
    Buff {
        target: CharacterId,
        deltas: Vec<StatDelta>,
    },

    /// The user offered itself as a protector.
    Protect {
        target: CharacterId,
        protector: CharacterId,
        outcome: ProtectOutcome,
    },

    /// The protect limit changed by `delta`, ending at `limit`.
    ProtectLimit {
        target: CharacterId,
        delta: i32,
        limit: i32,
    },
}

impl TargetEffect {
    pub fn target(&self) -> CharacterId {
        match self {
            Self::Damage { target, .. }
            | Self::DamageFailed { target }
            | Self::Heal { target, .. }
            | Self::Buff { target, .. }
            | Self::Protect { target, .. }
            | Self::ProtectLimit { target, .. } => *target,
        }
    }

    /// Health actually removed by this effect.
    pub fn damage_dealt(&self) -> u32 {
        match self {
            Self::Damage {
                intake: DamageIntake::Applied { amount },
                ..
            } => *amount,
            _ => 0,
        }
    }
}

// ============================================================================
// Action Outcome
// ============================================================================

/// Whether an action ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    /// Targets were resolved and every live one was processed. An action
    /// whose targets were all dead is still `Applied`, with no effects.
    Applied,

    /// The target calculator found no valid candidate (e.g. retaliation with
    /// nobody to retaliate against). Nothing happened.
    NoTargets,

    /// `use_action` was called on a static-target action before
    /// `set_targets`. Nothing happened.
    TargetsUnset,
}

/// Result of one `Action::use_action` call.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub status: ActionStatus,
    pub effects: Vec<TargetEffect>,
    pub tags: BTreeSet<String>,
}

impl ActionOutcome {
    pub fn applied(effects: Vec<TargetEffect>, tags: BTreeSet<String>) -> Self {
        Self {
            status: ActionStatus::Applied,
            effects,
            tags,
        }
    }

    pub fn skipped(status: ActionStatus, tags: BTreeSet<String>) -> Self {
        Self {
            status,
            effects: Vec::new(),
            tags,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.status, ActionStatus::Applied)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
