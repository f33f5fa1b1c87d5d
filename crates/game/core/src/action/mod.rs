//! Action domain.
//!
//! An action is one discrete effect inside a move: damage, heal, buff,
//! protect, or a protect-limit change. Content describes it with an
//! [`ActionConfig`] (variant + target calculator + numeric calculator + tags);
//! at runtime an [`Action`] carries that config plus the targets established
//! for the current use.
//!
//! # Module Structure
//!
//! - `targeting`: who an action affects, and when that is decided
//! - `formula`: damage, heal and success calculators
//! - `types`: per-target effects and action outcomes
//! - `execute`: the execution context and effect application

pub mod execute;
pub mod formula;
pub mod targeting;
pub mod types;

pub use execute::ActionContext;
pub use formula::{
    DamageCalculator, DamageRoll, HealCalculator, HealthBasis, MoveOutcome, SuccessCalculator,
};
pub use targeting::{TargetCalculator, TargetResolution, TargetSelection};
pub use types::{ActionOutcome, ActionStatus, TargetEffect};

use std::collections::BTreeSet;

use crate::error::BattleError;
use crate::history::ActionRecord;
use crate::stats::StatDelta;

/// Tag carried by damage actions that strike back at the last attacker.
pub const RETALIATION_TAG: &str = "retaliation";

// ============================================================================
// Configuration
// ============================================================================

/// What an action does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// `power` runs through the user's power-transform chain before the
    /// calculator sees it.
    Damage {
        power: i32,
        calculator: DamageCalculator,
    },
    Heal(HealCalculator),
    Buff(Vec<StatDelta>),
    /// The user joins each target's protect queue.
    Protect,
    ProtectLimitChange(i32),
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Damage { .. } => "damage",
            Self::Heal(_) => "heal",
            Self::Buff(_) => "buff",
            Self::Protect => "protect",
            Self::ProtectLimitChange(_) => "protect_limit_change",
        }
    }
}

/// Declarative description of an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionConfig {
    pub kind: ActionKind,
    pub targeting: TargetCalculator,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
}

impl ActionConfig {
    pub fn new(kind: ActionKind, targeting: TargetCalculator) -> Self {
        Self {
            kind,
            targeting,
            tags: BTreeSet::new(),
        }
    }

    pub fn damage(targeting: TargetCalculator, power: i32, calculator: DamageCalculator) -> Self {
        Self::new(ActionKind::Damage { power, calculator }, targeting)
    }

    pub fn heal(targeting: TargetCalculator, calculator: HealCalculator) -> Self {
        Self::new(ActionKind::Heal(calculator), targeting)
    }

    pub fn buff(targeting: TargetCalculator, deltas: impl IntoIterator<Item = StatDelta>) -> Self {
        Self::new(ActionKind::Buff(deltas.into_iter().collect()), targeting)
    }

    pub fn protect(targeting: TargetCalculator) -> Self {
        Self::new(ActionKind::Protect, targeting)
    }

    pub fn protect_limit_change(targeting: TargetCalculator, delta: i32) -> Self {
        Self::new(ActionKind::ProtectLimitChange(delta), targeting)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

// ============================================================================
// Runtime Action
// ============================================================================

/// An action prepared for one use.
///
/// Lifecycle: targets unset → targets set (by [`Action::set_targets`], or
/// lazily for reactive calculators) → consumed by [`Action::use_action`].
/// A consumed action must have its targets set again before the next use.
#[derive(Clone, Debug)]
pub struct Action {
    config: ActionConfig,
    targets: Option<TargetResolution>,
}

impl Action {
    pub fn new(config: ActionConfig) -> Self {
        Self {
            config,
            targets: None,
        }
    }

    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    pub fn has_targets(&self) -> bool {
        self.targets.is_some()
    }

    /// Establishes targets for the next use.
    ///
    /// Static calculators resolve now; reactive ones are stored and resolved
    /// inside [`Action::use_action`].
    pub fn set_targets(&mut self, ctx: &mut ActionContext<'_>) -> Result<(), BattleError> {
        self.targets = Some(self.config.targeting.declare(ctx)?);
        Ok(())
    }

    /// Runs the action against its established targets.
    ///
    /// Soft failures come back as a non-applied [`ActionOutcome`]:
    /// - `TargetsUnset` when a static calculator was never declared
    /// - `NoTargets` when the calculator found no candidate
    ///
    /// Dead targets are dropped first. An action whose targets all died still
    /// counts as applied, with no effects. Applied actions are appended to the
    /// history.
    pub fn use_action(&mut self, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, BattleError> {
        let tags = self.config.tags.clone();

        let resolution = match self.targets.take() {
            Some(resolution) => resolution,
            None if self.config.targeting.is_reactive() => {
                TargetResolution::Reactive(self.config.targeting)
            }
            None => {
                tracing::warn!(
                    "{} used {} action with no targets set",
                    ctx.user,
                    self.config.kind.label()
                );
                return Ok(ActionOutcome::skipped(ActionStatus::TargetsUnset, tags));
            }
        };

        let selection = resolution.resolve(ctx)?;
        if !selection.success {
            tracing::debug!(
                "{} {} action found no targets",
                ctx.user,
                self.config.kind.label()
            );
            return Ok(ActionOutcome::skipped(ActionStatus::NoTargets, tags));
        }

        let live: Vec<_> = selection
            .targets
            .into_iter()
            .filter(|&id| ctx.roster.is_alive(id))
            .collect();

        let effects = match &self.config.kind {
            ActionKind::Damage { power, calculator } => {
                execute::apply_damage(ctx, *power, calculator, &live)?
            }
            ActionKind::Heal(calculator) => execute::apply_heal(ctx, calculator, &live)?,
            ActionKind::Buff(deltas) => execute::apply_buff(ctx, deltas, &live)?,
            ActionKind::Protect => execute::apply_protect(ctx, &live)?,
            ActionKind::ProtectLimitChange(delta) => {
                execute::apply_protect_limit(ctx, *delta, &live)?
            }
        };

        ctx.history.record_action(ActionRecord {
            round: ctx.round,
            user: ctx.user,
            source: ctx.source.clone(),
            tags: tags.clone(),
            effects: effects.clone(),
        });

        Ok(ActionOutcome::applied(effects, tags))
    }

    /// Declares and uses a fresh copy of `config` in one step.
    ///
    /// Item triggers run this way, since nothing happens between their
    /// declaration and their use.
    pub fn trigger(
        config: &ActionConfig,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, BattleError> {
        let mut action = Self::new(config.clone());
        action.set_targets(ctx)?;
        action.use_action(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{
        BaseStats, Character, CharacterConfig, CharacterId, ProtectOutcome, Roster,
    };
    use crate::env::{RandomSource, ScriptedRandom};
    use crate::history::{ActionHistory, ActionSource};
    use crate::stats::StatKind;

    struct Fixture {
        roster: Roster,
        history: ActionHistory,
        rng: ScriptedRandom,
        ids: Vec<CharacterId>,
    }

    impl Fixture {
        fn new() -> Self {
            let roster: Roster = [
                ("Ana", "red", 20, 12),
                ("Bo", "red", 20, 10),
                ("Cy", "blue", 20, 10),
            ]
            .into_iter()
            .map(|(name, team, hp, attack)| {
                Character::new(CharacterConfig::new(
                    name,
                    team,
                    hp,
                    BaseStats::new(attack, 10, 10),
                ))
            })
            .collect();
            let ids = roster.ids();
            Self {
                roster,
                history: ActionHistory::new(),
                rng: ScriptedRandom::new([0]),
                ids,
            }
        }

        fn ctx(&mut self, user: usize) -> ActionContext<'_> {
            ActionContext::new(
                1,
                self.ids[user],
                ActionSource::Move("Test".into()),
                &mut self.roster,
                &mut self.history,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn use_without_targets_is_soft_failure() {
        let mut fx = Fixture::new();
        let mut action = Action::new(ActionConfig::damage(
            TargetCalculator::AllOthers,
            5,
            DamageCalculator::Absolute,
        ));

        let outcome = action.use_action(&mut fx.ctx(0)).unwrap();

        assert_eq!(outcome.status, ActionStatus::TargetsUnset);
        assert!(outcome.effects.is_empty());
        assert!(fx.history.is_empty());
        assert_eq!(fx.roster.get(fx.ids[2]).unwrap().current_health(), 20);
    }

    #[test]
    fn buff_raises_attack_by_twenty_percent() {
        let mut fx = Fixture::new();
        let mut action = Action::new(ActionConfig::buff(
            TargetCalculator::User,
            [StatDelta::new(StatKind::Attack, 0.2)],
        ));

        let mut ctx = fx.ctx(1);
        action.set_targets(&mut ctx).unwrap();
        let outcome = action.use_action(&mut ctx).unwrap();

        assert!(outcome.success());
        assert_eq!(fx.roster.get(fx.ids[1]).unwrap().stat(StatKind::Attack), 12);
    }

    #[test]
    fn targets_are_consumed_by_use() {
        let mut fx = Fixture::new();
        let mut action = Action::new(ActionConfig::damage(
            TargetCalculator::AllOthers,
            3,
            DamageCalculator::Absolute,
        ));

        let mut ctx = fx.ctx(0);
        action.set_targets(&mut ctx).unwrap();
        assert!(action.use_action(&mut ctx).unwrap().success());
        assert!(!action.has_targets());

        let second = action.use_action(&mut ctx).unwrap();
        assert_eq!(second.status, ActionStatus::TargetsUnset);
    }

    #[test]
    fn dead_targets_are_filtered_but_action_applies() {
        let mut fx = Fixture::new();
        let enemy = fx.ids[2];
        fx.roster
            .get_mut(enemy)
            .unwrap()
            .receive_damage(25, CharacterId(999));

        let mut action = Action::new(ActionConfig::heal(
            TargetCalculator::AllOthers,
            HealCalculator::Absolute(5),
        ));
        let mut ctx = fx.ctx(0);
        action.set_targets(&mut ctx).unwrap();
        let outcome = action.use_action(&mut ctx).unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.effects.len(), 1);
        assert_eq!(fx.roster.get(enemy).unwrap().current_health(), -5);
    }

    #[test]
    fn retaliation_without_history_reports_no_targets() {
        let mut fx = Fixture::new();
        let mut action = Action::new(
            ActionConfig::damage(
                TargetCalculator::LastAttacker,
                0,
                DamageCalculator::LastReceivedPercent { percent: 150 },
            )
            .with_tag(RETALIATION_TAG),
        );

        let outcome = action.use_action(&mut fx.ctx(0)).unwrap();

        assert_eq!(outcome.status, ActionStatus::NoTargets);
        assert!(outcome.has_tag(RETALIATION_TAG));
    }

    #[test]
    fn stat_difference_never_drops_below_one() {
        let mut fx = Fixture::new();
        // Bo has attack 10 against Cy's defence 10.
        let mut action = Action::new(ActionConfig::damage(
            TargetCalculator::SingleEnemy,
            4,
            DamageCalculator::StatDifference,
        ));
        let mut ctx = fx.ctx(1);
        action.set_targets(&mut ctx).unwrap();
        let outcome = action.use_action(&mut ctx).unwrap();

        assert_eq!(outcome.effects[0].damage_dealt(), 1);
        assert_eq!(fx.roster.get(fx.ids[2]).unwrap().current_health(), 19);
    }

    #[test]
    fn second_protect_is_rejected_at_limit() {
        let mut fx = Fixture::new();
        let ally = fx.ids[1];
        let config = ActionConfig::protect(TargetCalculator::SingleAlly);

        for expected in [ProtectOutcome::Added, ProtectOutcome::Rejected] {
            let outcome = Action::trigger(&config, &mut fx.ctx(0)).unwrap();
            assert!(outcome.success());
            assert_eq!(
                outcome.effects,
                vec![TargetEffect::Protect {
                    target: ally,
                    protector: fx.ids[0],
                    outcome: expected,
                }]
            );
        }
        assert_eq!(fx.roster.get(ally).unwrap().protect_queue().len(), 1);
    }

    /// Ignores the requested bound.
    struct Overshoot;

    impl RandomSource for Overshoot {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_in_range(&mut self, _min: u32, max: u32) -> u32 {
            max
        }
    }

    #[test]
    fn random_target_out_of_range_is_invalid_choice() {
        let mut fx = Fixture::new();
        let mut rng = Overshoot;
        let mut ctx = ActionContext::new(
            1,
            fx.ids[0],
            ActionSource::Move("Test".into()),
            &mut fx.roster,
            &mut fx.history,
            &mut rng,
        );

        let err = TargetCalculator::RandomOther.calculate(&mut ctx).unwrap_err();

        assert_eq!(err, BattleError::InvalidChoice { index: 2, len: 2 });
    }
}
