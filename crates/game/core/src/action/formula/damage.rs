//! Damage calculators.

use super::{percent_of, to_amount};
use crate::action::execute::ActionContext;
use crate::character::{Character, CharacterId};
use crate::error::BattleError;
use crate::history::{ActionSource, UseCount};
use crate::stats::StatKind;

/// Which health figure a percentage calculator reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthBasis {
    #[default]
    Current,
    Max,
}

/// How much damage an action deals to each target.
///
/// Every policy receives the action's power after the user's power-transform
/// chain has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCalculator {
    /// Exactly `power`, regardless of stats.
    Absolute,

    /// `max(1, power × (attack − defence))`.
    StatDifference,

    /// A percentage of the target's current or max health.
    TargetHealthPercent { percent: u32, basis: HealthBasis },

    /// `max(1, last × percent / 100)` where `last` is the most recent damage
    /// the user took from a move. Fails when the user has not been hit.
    LastReceivedPercent { percent: u32 },

    /// Stat-difference damage whose power moves by `step` for every earlier
    /// use of the same move that `counted` accepts, bounded to
    /// `[min_power, max_power]`.
    LinearByUses {
        step: i32,
        min_power: i32,
        max_power: i32,
        counted: UseCount,
    },
}

/// Damage computed for one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    pub target: CharacterId,
    /// When false the amount is meaningless and nothing should be applied.
    pub success: bool,
    pub amount: u32,
}

impl DamageRoll {
    fn hit(target: CharacterId, amount: u32) -> Self {
        Self {
            target,
            success: true,
            amount,
        }
    }

    fn failed(target: CharacterId) -> Self {
        Self {
            target,
            success: false,
            amount: 0,
        }
    }
}

impl DamageCalculator {
    /// Computes one roll per target. Reads state only.
    pub fn calculate(
        &self,
        ctx: &ActionContext<'_>,
        power: i32,
        targets: &[CharacterId],
    ) -> Result<Vec<DamageRoll>, BattleError> {
        let user = ctx.roster.require(ctx.user)?;

        targets
            .iter()
            .map(|&id| {
                let target = ctx.roster.require(id)?;
                Ok(self.roll(ctx, user, target, power))
            })
            .collect()
    }

    fn roll(
        &self,
        ctx: &ActionContext<'_>,
        user: &Character,
        target: &Character,
        power: i32,
    ) -> DamageRoll {
        match *self {
            Self::Absolute => DamageRoll::hit(target.id(), to_amount(i64::from(power))),
            Self::StatDifference => {
                DamageRoll::hit(target.id(), stat_difference(user, target, power))
            }
            Self::TargetHealthPercent { percent, basis } => {
                let health = match basis {
                    HealthBasis::Current => target.current_health(),
                    HealthBasis::Max => target.max_health(),
                };
                let health = u64::try_from(health).unwrap_or(0);
                let amount = percent_of(health, percent);
                DamageRoll::hit(target.id(), u32::try_from(amount).unwrap_or(u32::MAX))
            }
            Self::LastReceivedPercent { percent } => {
                match ctx.history.last_damage_received(user.id()) {
                    Some(last) => {
                        let scaled = u64::from(last.amount) * u64::from(percent) / 100;
                        let amount = u32::try_from(scaled).unwrap_or(u32::MAX).max(1);
                        DamageRoll::hit(target.id(), amount)
                    }
                    None => DamageRoll::failed(target.id()),
                }
            }
            Self::LinearByUses {
                step,
                min_power,
                max_power,
                counted,
            } => {
                let uses = match &ctx.source {
                    ActionSource::Move(name) => {
                        ctx.history.count_move_outcomes(user.id(), name, counted)
                    }
                    ActionSource::Item(_) => 0,
                };
                let shifted = i64::from(power) + i64::from(step) * i64::from(uses);
                let bounded = shifted.max(i64::from(min_power)).min(i64::from(max_power));
                // bounded lies between two i32 values
                let scaled_power = bounded as i32;
                DamageRoll::hit(target.id(), stat_difference(user, target, scaled_power))
            }
        }
    }
}

/// `max(1, power × (attack − defence))`
fn stat_difference(user: &Character, target: &Character, power: i32) -> u32 {
    let attack = i64::from(user.stat(StatKind::Attack));
    let defence = i64::from(target.stat(StatKind::Defence));
    let raw = i64::from(power) * (attack - defence);
    to_amount(raw.max(1))
}
