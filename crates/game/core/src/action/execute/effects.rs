//! Effect application, one helper per action variant.
//!
//! Each helper receives the live targets of one action use and returns one
//! [`TargetEffect`] per target. Dead targets have already been filtered out by
//! the caller.

use crate::action::formula::{DamageCalculator, HealCalculator};
use crate::action::types::TargetEffect;
use crate::character::CharacterId;
use crate::error::BattleError;
use crate::stats::StatDelta;

use super::ActionContext;

/// Computes damage for every target first, then applies each roll.
///
/// Calculation reads state as it was before the action; a protector absorbing
/// one hit does not change the figures of the others.
pub(crate) fn apply_damage(
    ctx: &mut ActionContext<'_>,
    power: i32,
    calculator: &DamageCalculator,
    targets: &[CharacterId],
) -> Result<Vec<TargetEffect>, BattleError> {
    let power = ctx.roster.require(ctx.user)?.effective_power(power);
    let rolls = calculator.calculate(ctx, power, targets)?;
    let user = ctx.user;

    let mut effects = Vec::with_capacity(rolls.len());
    for roll in rolls {
        if !roll.success {
            tracing::debug!("{:?} failed against {}", calculator, roll.target);
            effects.push(TargetEffect::DamageFailed {
                target: roll.target,
            });
            continue;
        }
        let intake = ctx
            .roster
            .require_mut(roll.target)?
            .receive_damage(roll.amount, user);
        effects.push(TargetEffect::Damage {
            target: roll.target,
            amount: roll.amount,
            intake,
        });
    }
    Ok(effects)
}

pub(crate) fn apply_heal(
    ctx: &mut ActionContext<'_>,
    calculator: &HealCalculator,
    targets: &[CharacterId],
) -> Result<Vec<TargetEffect>, BattleError> {
    let user = ctx.user;
    targets
        .iter()
        .map(|&id| {
            let target = ctx.roster.require_mut(id)?;
            let requested = calculator.calculate(target);
            let amount = target.heal(requested, user);
            Ok(TargetEffect::Heal { target: id, amount })
        })
        .collect()
}

pub(crate) fn apply_buff(
    ctx: &mut ActionContext<'_>,
    deltas: &[StatDelta],
    targets: &[CharacterId],
) -> Result<Vec<TargetEffect>, BattleError> {
    let user = ctx.user;
    targets
        .iter()
        .map(|&id| {
            ctx.roster.require_mut(id)?.receive_buff(deltas, user);
            Ok(TargetEffect::Buff {
                target: id,
                deltas: deltas.to_vec(),
            })
        })
        .collect()
}

/// A full queue rejects only that target.
pub(crate) fn apply_protect(
    ctx: &mut ActionContext<'_>,
    targets: &[CharacterId],
) -> Result<Vec<TargetEffect>, BattleError> {
    let user = ctx.user;
    targets
        .iter()
        .map(|&id| {
            let outcome = ctx.roster.require_mut(id)?.add_protect(user);
            tracing::debug!("{} offers protection to {}: {:?}", user, id, outcome);
            Ok(TargetEffect::Protect {
                target: id,
                protector: user,
                outcome,
            })
        })
        .collect()
}

pub(crate) fn apply_protect_limit(
    ctx: &mut ActionContext<'_>,
    delta: i32,
    targets: &[CharacterId],
) -> Result<Vec<TargetEffect>, BattleError> {
    targets
        .iter()
        .map(|&id| {
            let limit = ctx.roster.require_mut(id)?.change_protect_limit(delta);
            Ok(TargetEffect::ProtectLimit {
                target: id,
                delta,
                limit,
            })
        })
        .collect()
}
