//! Battle orchestration.
//!
//! [`Battle`] owns the roster, the action history and the injected
//! collaborators, and advances the fight one round at a time:
//!
//! 1. start-of-turn item actions
//! 2. every living character declares a move (static targets lock in here)
//! 3. the queue is ordered by priority, then speed
//! 4. each move-use resolves in order; users that died meanwhile are skipped
//! 5. end-of-turn item actions
//! 6. the battle status is re-evaluated
//!
//! The whole round runs synchronously. The only outside input is the
//! [`ChoiceProvider`], which always returns before resolution continues.

mod policy;
mod report;
mod turns;

pub use report::{
    BattleEvent, BattleStatus, ItemPhase, PassReason, PresentationSink, RoundReport,
};

use std::collections::BTreeSet;

use crate::action::{Action, ActionContext};
use crate::character::{
    Character, CharacterConfig, CharacterId, Controller, Roster, ScriptedPolicy,
};
use crate::config::BattleConfig;
use crate::env::{ChoiceProvider, MoveOption, PcgRandom, RandomSource};
use crate::error::BattleError;
use crate::history::{ActionHistory, ActionSource};
use crate::moves::{MoveUse, MoveUseResult};

use report::push_outcome;

/// A battle between teams, resolved round by round.
pub struct Battle {
    roster: Roster,
    history: ActionHistory,
    config: BattleConfig,
    rng: Box<dyn RandomSource>,
    choices: Option<Box<dyn ChoiceProvider>>,
    round: u32,
    status: BattleStatus,
    fallen: BTreeSet<CharacterId>,
}

impl Battle {
    /// Creates a battle seeded from `config.seed`.
    pub fn new(characters: Vec<Character>, config: BattleConfig) -> Self {
        let roster = Roster::new(characters);
        let fallen = roster
            .iter()
            .filter(|c| c.is_dead())
            .map(Character::id)
            .collect();
        Self {
            roster,
            history: ActionHistory::new(),
            rng: Box::new(PcgRandom::new(config.seed)),
            config,
            choices: None,
            round: 0,
            status: BattleStatus::Ongoing,
            fallen,
        }
    }

    /// Builds every character with the configured default protect limit.
    pub fn from_configs(
        configs: impl IntoIterator<Item = CharacterConfig>,
        config: BattleConfig,
    ) -> Self {
        let characters = configs
            .into_iter()
            .map(|c| Character::from_config(c, config.default_protect_limit))
            .collect();
        Self::new(characters, config)
    }

    /// Replaces the seeded random source.
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Player-controlled characters ask `choices`. Without a provider they
    /// fall back to the default scripted policy.
    pub fn with_choices(mut self, choices: impl ChoiceProvider + 'static) -> Self {
        self.choices = Some(Box::new(choices));
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Rounds played so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn status(&self) -> &BattleStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Plays rounds until the battle ends, presenting each one.
    pub fn run(&mut self, sink: &mut dyn PresentationSink) -> Result<BattleStatus, BattleError> {
        while !self.status.is_over() {
            let report = self.play_round()?;
            sink.present(&report, &self.roster);
        }
        tracing::info!("battle finished after {} rounds: {:?}", self.round, self.status);
        sink.finish(&self.status, &self.roster);
        Ok(self.status.clone())
    }

    /// Resolves one full round.
    ///
    /// A finished battle returns an empty report without advancing.
    pub fn play_round(&mut self) -> Result<RoundReport, BattleError> {
        if self.status.is_over() {
            return Ok(RoundReport {
                round: self.round,
                events: Vec::new(),
                status: self.status.clone(),
            });
        }

        self.round += 1;
        tracing::info!("round {} begins", self.round);
        let mut events = Vec::new();

        self.trigger_items(ItemPhase::StartOfTurn, &mut events)?;

        let mut queue = self.collect_choices(&mut events)?;
        turns::order_queue(&mut queue, &self.roster);
        for move_use in queue {
            self.resolve_move(move_use, &mut events)?;
        }

        self.trigger_items(ItemPhase::EndOfTurn, &mut events)?;

        self.status = self.evaluate_status();
        tracing::info!("round {} ends: {:?}", self.round, self.status);

        Ok(RoundReport {
            round: self.round,
            events,
            status: self.status.clone(),
        })
    }

    fn context(&mut self, user: CharacterId, source: ActionSource) -> ActionContext<'_> {
        let choices = self
            .choices
            .as_deref_mut()
            .map(|provider| provider as &mut dyn ChoiceProvider);
        ActionContext::new(
            self.round,
            user,
            source,
            &mut self.roster,
            &mut self.history,
            &mut *self.rng,
        )
        .with_choices(choices)
    }

    // ===== phases =====

    fn trigger_items(
        &mut self,
        phase: ItemPhase,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        for id in self.roster.ids() {
            let Some(character) = self.roster.get(id) else {
                continue;
            };
            if character.is_dead() {
                continue;
            }
            let Some(item) = character.item() else {
                continue;
            };
            let trigger = match phase {
                ItemPhase::StartOfTurn => item.start_of_turn.clone(),
                ItemPhase::EndOfTurn => item.end_of_turn.clone(),
            };
            let Some(config) = trigger else {
                continue;
            };

            let source = ActionSource::Item(item.name.clone());
            events.push(BattleEvent::ItemTriggered {
                character: id,
                item: item.name.clone(),
                phase,
            });
            tracing::debug!("{} triggers {:?} item action from {:?}", id, phase, source);

            let outcome = Action::trigger(&config, &mut self.context(id, source.clone()))?;
            push_outcome(events, id, &source, &outcome);
            self.record_deaths(events);
        }
        Ok(())
    }

    fn collect_choices(
        &mut self,
        events: &mut Vec<BattleEvent>,
    ) -> Result<Vec<MoveUse>, BattleError> {
        let mut queue = Vec::new();
        for id in self.roster.living() {
            let Some(slot) = self.choose_slot(id)? else {
                tracing::warn!("{} has no usable moves and passes", id);
                events.push(BattleEvent::Passed {
                    character: id,
                    reason: PassReason::NoUsableMoves,
                });
                continue;
            };

            let move_name = self.roster.require(id)?.move_at(slot)?.name().to_owned();
            let source = ActionSource::Move(move_name.clone());
            let move_use = MoveUse::declare(slot, &mut self.context(id, source))?;
            events.push(BattleEvent::MoveChosen {
                character: id,
                move_name,
            });
            queue.push(move_use);
        }
        Ok(queue)
    }

    fn choose_slot(&mut self, id: CharacterId) -> Result<Option<usize>, BattleError> {
        let character = self.roster.require(id)?;
        let usable = character.usable_moves();
        if usable.is_empty() {
            return Ok(None);
        }

        let policy = match character.controller() {
            Controller::Scripted(policy) => policy,
            Controller::Player => match self.choices.as_mut() {
                Some(provider) => {
                    let options = usable
                        .iter()
                        .filter_map(|&slot| {
                            let mv = character.moves().get(slot)?;
                            Some(MoveOption {
                                slot,
                                name: mv.name().to_owned(),
                                description: mv.description().to_owned(),
                                remaining_uses: mv.remaining_uses(),
                                max_uses: mv.max_uses(),
                            })
                        })
                        .collect::<Vec<_>>();
                    let index = provider.choose_move(character, &options);
                    let option = options.get(index).ok_or(BattleError::InvalidChoice {
                        index,
                        len: options.len(),
                    })?;
                    return Ok(Some(option.slot));
                }
                None => ScriptedPolicy::default(),
            },
        };

        Ok(policy::choose_slot(policy, &usable, self.round, &mut *self.rng))
    }

    fn resolve_move(
        &mut self,
        move_use: MoveUse,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let user = move_use.user();
        let move_name = move_use.move_name().to_owned();

        if !self.roster.is_alive(user) {
            tracing::warn!("{} fell before using '{}'", user, move_name);
            events.push(BattleEvent::Passed {
                character: user,
                reason: PassReason::Dead,
            });
            return Ok(());
        }

        let source = ActionSource::Move(move_name.clone());
        let result = move_use.resolve(&mut self.context(user, source.clone()))?;

        match result {
            MoveUseResult::Unavailable => events.push(BattleEvent::MoveUnavailable {
                character: user,
                move_name,
            }),
            MoveUseResult::Resolved { outcome, actions } => {
                events.push(BattleEvent::MoveResolved {
                    character: user,
                    move_name,
                    outcome,
                });
                for action in &actions {
                    push_outcome(events, user, &source, action);
                }
            }
        }

        self.record_deaths(events);
        Ok(())
    }

    fn record_deaths(&mut self, events: &mut Vec<BattleEvent>) {
        for character in self.roster.iter() {
            if character.is_dead() && self.fallen.insert(character.id()) {
                tracing::info!(
                    "{} ({}) has fallen at {} hp",
                    character.name(),
                    character.id(),
                    character.current_health()
                );
                events.push(BattleEvent::Died {
                    character: character.id(),
                });
            }
        }
    }

    fn evaluate_status(&self) -> BattleStatus {
        let mut teams = self.roster.living_teams().into_iter();
        match (teams.next(), teams.next()) {
            (None, _) => BattleStatus::Draw,
            (Some(team), None) => BattleStatus::Won { team },
            _ if self.round >= self.config.max_rounds => BattleStatus::Draw,
            _ => BattleStatus::Ongoing,
        }
    }
}
