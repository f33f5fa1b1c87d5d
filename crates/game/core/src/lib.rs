//! Deterministic turn-based combat rules.
//!
//! `battle-core` resolves rounds of simultaneously chosen moves into an
//! ordered sequence of effects. Content is plain configuration
//! ([`CharacterConfig`], [`MoveConfig`], [`ActionConfig`]); all mutation flows
//! through [`engine::Battle`], and randomness and player input are injected
//! through [`env`] so any battle can be replayed exactly.
pub mod action;
pub mod character;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod history;
pub mod moves;
pub mod stats;

pub use action::{
    Action, ActionConfig, ActionContext, ActionKind, ActionOutcome, ActionStatus,
    DamageCalculator, HealCalculator, HealthBasis, MoveOutcome, RETALIATION_TAG,
    SuccessCalculator, TargetCalculator, TargetEffect, TargetResolution, TargetSelection,
};
pub use character::{
    BaseStats, Character, CharacterConfig, CharacterId, Controller, DamageIntake, Item,
    ProtectOutcome, ProtectQueue, Roster, ScriptedPolicy, Team,
};
pub use config::BattleConfig;
pub use engine::{
    Battle, BattleEvent, BattleStatus, ItemPhase, PassReason, PresentationSink, RoundReport,
};
pub use env::{
    ChoiceProvider, FirstChoice, MoveOption, PcgRandom, RandomSource, ScriptedChoices,
    ScriptedRandom,
};
pub use error::{BattleError, ErrorSeverity, GameError};
pub use history::{ActionHistory, ActionRecord, ActionSource, MoveRecord, UseCount};
pub use moves::{Move, MoveConfig, MoveUse, MoveUseResult};
pub use stats::{PowerTransform, Stat, StatDelta, StatKind, StatSet, StatTransform};
