//! Characters and their combat state machine.
//!
//! Each attribute evolves independently:
//! - **Health**: alive while `current_health > 0`, dead (terminal) otherwise.
//!   Health is never clamped at zero, so overkill damage stays visible.
//! - **Stats**: multipliers accumulate through buffs.
//! - **Protect queue**: FIFO of protectors bounded by the protect limit.
//! - **Moves**: each move carries its own use budget.
//! - **Equipment**: at most one item, whose transforms apply while equipped.

mod item;
mod protect;
mod roster;

pub use item::Item;
pub use protect::{ProtectOutcome, ProtectQueue};
pub use roster::Roster;

use std::fmt;

use crate::config::BattleConfig;
use crate::error::BattleError;
use crate::moves::{Move, MoveConfig};
use crate::stats::{PowerTransform, StatDelta, StatKind, StatSet, apply_chain};

// ============================================================================
// Identity
// ============================================================================

/// Identifier for a character within one battle.
///
/// A [`Roster`] numbers its characters from 1 in enumeration order, so the
/// same roster always yields the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Carried until the character joins a roster.
    pub const UNASSIGNED: Self = Self(0);
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team tag. Characters sharing a tag are allies.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Team(pub String);

impl Team {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Team {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Controllers
// ============================================================================

/// Who decides a character's move each round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    /// Move and target choices come from the injected choice provider.
    Player,
    /// Moves come from an internal policy; targets are picked at random.
    Scripted(ScriptedPolicy),
}

impl Controller {
    pub fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::Scripted(ScriptedPolicy::Random)
    }
}

/// Move selection policy for scripted characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptedPolicy {
    /// The first move in the move set that still has uses left.
    FirstUsable,
    /// Uniformly random among usable moves.
    #[default]
    Random,
    /// Round-robin over usable moves by round number.
    Cycle,
}

// ============================================================================
// Configuration
// ============================================================================

/// Base values for the three stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub attack: i32,
    pub defence: i32,
    pub speed: i32,
}

impl BaseStats {
    pub fn new(attack: i32, defence: i32, speed: i32) -> Self {
        Self {
            attack,
            defence,
            speed,
        }
    }
}

/// Static description of a character, as read from content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterConfig {
    pub name: String,
    pub team: Team,
    pub max_health: i32,
    pub stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moves: Vec<MoveConfig>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub controller: Controller,
    /// Overrides the battle-wide default protect limit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub protect_limit: Option<i32>,
}

impl CharacterConfig {
    pub fn new(
        name: impl Into<String>,
        team: impl Into<Team>,
        max_health: i32,
        stats: BaseStats,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            max_health,
            stats,
            moves: Vec::new(),
            item: None,
            controller: Controller::default(),
            protect_limit: None,
        }
    }

    #[must_use]
    pub fn with_move(mut self, config: MoveConfig) -> Self {
        self.moves.push(config);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    #[must_use]
    pub fn with_protect_limit(mut self, limit: i32) -> Self {
        self.protect_limit = Some(limit);
        self
    }
}

// ============================================================================
// Damage intake
// ============================================================================

/// What happened to one incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageIntake {
    /// Health was reduced by `amount`.
    Applied { amount: u32 },
    /// A queued protector absorbed the hit; no damage was taken.
    Protected { by: CharacterId },
}

impl DamageIntake {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn protected_by(self) -> Option<CharacterId> {
        match self {
            Self::Protected { by } => Some(by),
            Self::Applied { .. } => None,
        }
    }
}

// ============================================================================
// Character
// ============================================================================

/// A combatant. Created once per battle and never removed; death is a state.
#[derive(Clone, Debug)]
pub struct Character {
    id: CharacterId,
    name: String,
    team: Team,
    controller: Controller,
    max_health: i32,
    current_health: i32,
    stats: StatSet,
    moves: Vec<Move>,
    item: Option<Item>,
    power_chain: Vec<PowerTransform>,
    protect: ProtectQueue,
}

impl Character {
    /// Builds a character using the default protect limit of 1.
    pub fn new(config: CharacterConfig) -> Self {
        Self::from_config(config, BattleConfig::DEFAULT_PROTECT_LIMIT)
    }

    /// Builds a character, falling back to `default_protect_limit` when the
    /// configuration does not set one.
    pub fn from_config(config: CharacterConfig, default_protect_limit: i32) -> Self {
        let CharacterConfig {
            name,
            team,
            max_health,
            stats,
            moves,
            item,
            controller,
            protect_limit,
        } = config;

        let mut character = Self {
            id: CharacterId::UNASSIGNED,
            name,
            team,
            controller,
            max_health,
            current_health: max_health,
            stats: StatSet::new(stats.attack, stats.defence, stats.speed),
            moves: moves.into_iter().map(Move::new).collect(),
            item: None,
            power_chain: Vec::new(),
            protect: ProtectQueue::new(protect_limit.unwrap_or(default_protect_limit)),
        };
        if let Some(item) = item {
            character.equip(item);
        }
        character
    }

    // ===== identity =====

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn is_ally_of(&self, other: &Character) -> bool {
        self.team == other.team
    }

    // ===== health =====

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Takes one hit.
    ///
    /// A queued protector absorbs the whole hit. Otherwise health drops by
    /// `amount` with no floor.
    pub fn receive_damage(&mut self, amount: u32, source: CharacterId) -> DamageIntake {
        if let Some(protector) = self.protect.pop() {
            tracing::debug!(
                "{} protected {} from {} damage by {}",
                protector,
                self.id,
                amount,
                source
            );
            return DamageIntake::Protected { by: protector };
        }

        let loss = i32::try_from(amount).unwrap_or(i32::MAX);
        self.current_health = self.current_health.saturating_sub(loss);
        tracing::debug!(
            "{} took {} damage from {} (hp {}/{})",
            self.id,
            amount,
            source,
            self.current_health,
            self.max_health
        );
        DamageIntake::Applied { amount }
    }

    /// Restores up to `amount` health, never past the maximum.
    ///
    /// Returns the health actually restored. Dead characters cannot be healed.
    pub fn heal(&mut self, amount: u32, source: CharacterId) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let missing = u32::try_from(self.max_health - self.current_health).unwrap_or(0);
        let restored = missing.min(amount);
        // restored <= missing, which came from an i32
        self.current_health += restored as i32;
        tracing::debug!(
            "{} healed {} by {} (hp {}/{})",
            source,
            self.id,
            restored,
            self.current_health,
            self.max_health
        );
        restored
    }

    // ===== stats =====

    pub fn stats(&self) -> &StatSet {
        &self.stats
    }

    /// Current value of a stat with equipment stat transforms applied.
    pub fn stat(&self, kind: StatKind) -> i32 {
        let base = self.stats.get(kind).current_value();
        match &self.item {
            Some(item) => item
                .stat_transforms
                .iter()
                .filter(|t| t.stat == kind)
                .fold(base, |acc, t| t.transform.apply(acc)),
            None => base,
        }
    }

    pub fn receive_buff(&mut self, deltas: &[StatDelta], source: CharacterId) {
        for delta in deltas {
            self.stats.get_mut(delta.stat).add_multiplier(delta.delta);
            tracing::debug!(
                "{} changed {}'s {} multiplier by {:+}",
                source,
                self.id,
                delta.stat,
                delta.delta
            );
        }
    }

    /// Applies a buff payload keyed by stat name, as it appears in content.
    ///
    /// Every key is validated before any multiplier changes.
    pub fn receive_buff_by_key(
        &mut self,
        deltas: &[(&str, f64)],
        source: CharacterId,
    ) -> Result<(), BattleError> {
        let parsed = deltas
            .iter()
            .map(|(key, delta)| StatKind::parse_key(key).map(|stat| StatDelta::new(stat, *delta)))
            .collect::<Result<Vec<_>, _>>()?;
        self.receive_buff(&parsed, source);
        Ok(())
    }

    /// Runs `base` through the equipment power-transform chain.
    pub fn effective_power(&self, base: i32) -> i32 {
        apply_chain(base, &self.power_chain)
    }

    // ===== protection =====

    pub fn protect_queue(&self) -> &ProtectQueue {
        &self.protect
    }

    pub fn protect_limit(&self) -> i32 {
        self.protect.limit()
    }

    pub fn add_protect(&mut self, protector: CharacterId) -> ProtectOutcome {
        self.protect.push(protector)
    }

    /// Pops the front protector. Callers must check the queue first.
    pub fn consume_protect(&mut self) -> Result<CharacterId, BattleError> {
        self.protect
            .pop()
            .ok_or(BattleError::EmptyProtectQueue { character: self.id })
    }

    pub fn change_protect_limit(&mut self, delta: i32) -> i32 {
        self.protect.change_limit(delta)
    }

    // ===== moves =====

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_at(&self, slot: usize) -> Result<&Move, BattleError> {
        self.moves.get(slot).ok_or(BattleError::MoveNotFound {
            character: self.id,
            slot,
        })
    }

    pub fn move_at_mut(&mut self, slot: usize) -> Result<&mut Move, BattleError> {
        let id = self.id;
        self.moves
            .get_mut(slot)
            .ok_or(BattleError::MoveNotFound { character: id, slot })
    }

    /// Slots of moves that still have uses left.
    pub fn usable_moves(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.can_use())
            .map(|(slot, _)| slot)
            .collect()
    }

    // ===== equipment =====

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// Equips `item`, returning whatever was equipped before.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        let previous = self.item.replace(item);
        self.rebuild_power_chain();
        previous
    }

    pub fn unequip(&mut self) -> Option<Item> {
        let previous = self.item.take();
        self.rebuild_power_chain();
        previous
    }

    fn rebuild_power_chain(&mut self) {
        self.power_chain = self
            .item
            .as_ref()
            .map(|item| item.power_transforms.clone())
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatTransform;

    fn character(max_health: i32) -> Character {
        Character::new(CharacterConfig::new(
            "Tester",
            "blue",
            max_health,
            BaseStats::new(10, 5, 5),
        ))
    }

    #[test]
    fn damage_without_protection_reduces_health() {
        let mut target = character(5);
        let intake = target.receive_damage(2, CharacterId(0));

        assert_eq!(target.current_health(), 3);
        assert!(intake.is_applied());
    }

    #[test]
    fn health_may_go_negative() {
        let mut target = character(5);
        target.receive_damage(12, CharacterId(0));

        assert_eq!(target.current_health(), -7);
        assert!(target.is_dead());
    }

    #[test]
    fn protector_absorbs_hit() {
        let mut target = character(5);
        let protector = CharacterId(42);
        assert!(target.add_protect(protector).is_added());

        let intake = target.receive_damage(3, CharacterId(0));

        assert_eq!(target.current_health(), 5);
        assert_eq!(intake.protected_by(), Some(protector));
        assert!(target.protect_queue().is_empty());
    }

    #[test]
    fn heal_clamps_to_max() {
        let mut target = character(10);
        target.receive_damage(4, CharacterId(0));

        assert_eq!(target.heal(100, CharacterId(0)), 4);
        assert_eq!(target.current_health(), 10);
        assert_eq!(target.heal(5, CharacterId(0)), 0);
    }

    #[test]
    fn dead_characters_stay_dead() {
        let mut target = character(3);
        target.receive_damage(3, CharacterId(0));
        assert!(target.is_dead());

        assert_eq!(target.heal(10, CharacterId(0)), 0);
        assert!(target.is_dead());
    }

    #[test]
    fn consume_protect_on_empty_queue_is_an_error() {
        let mut target = character(5);
        let err = target.consume_protect().unwrap_err();
        assert_eq!(
            err,
            BattleError::EmptyProtectQueue {
                character: target.id()
            }
        );
    }

    #[test]
    fn buff_by_unknown_key_changes_nothing() {
        let mut target = character(5);
        let result = target.receive_buff_by_key(&[("attack", 0.5), ("luck", 1.0)], CharacterId(0));

        assert_eq!(result, Err(BattleError::UnknownStat("luck".into())));
        assert_eq!(target.stat(StatKind::Attack), 10);
    }

    #[test]
    fn equip_and_unequip_rebuild_transforms() {
        let mut wearer = character(5);
        let item = Item::new("Band", "")
            .with_power_transform(PowerTransform::Add(3))
            .with_stat_transform(StatTransform::new(StatKind::Speed, PowerTransform::Percent(200)));

        assert!(wearer.equip(item).is_none());
        assert_eq!(wearer.effective_power(2), 5);
        assert_eq!(wearer.stat(StatKind::Speed), 10);

        let removed = wearer.unequip().unwrap();
        assert_eq!(removed.name, "Band");
        assert_eq!(wearer.effective_power(2), 2);
        assert_eq!(wearer.stat(StatKind::Speed), 5);
    }

    #[test]
    fn roster_numbers_characters_in_order() {
        assert_eq!(character(1).id(), CharacterId::UNASSIGNED);

        let first: Roster = [character(1), character(2)].into_iter().collect();
        let second: Roster = [character(1), character(2)].into_iter().collect();

        assert_eq!(first.ids(), vec![CharacterId(1), CharacterId(2)]);
        assert_eq!(first.ids(), second.ids());
    }
}
