//! The battle's full set of characters.

use std::collections::BTreeSet;

use super::{Character, CharacterId, Team};
use crate::error::BattleError;

/// Every character in a battle, in enumeration order.
///
/// Enumeration order is the final tie-break when ordering move-uses, so it
/// never changes after construction.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Takes ownership of `characters` and numbers them from 1.
    pub fn new(mut characters: Vec<Character>) -> Self {
        for (slot, character) in (1..).zip(characters.iter_mut()) {
            character.id = CharacterId(slot);
        }
        Self { characters }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn ids(&self) -> Vec<CharacterId> {
        self.characters.iter().map(Character::id).collect()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id() == id)
    }

    pub fn require(&self, id: CharacterId) -> Result<&Character, BattleError> {
        self.get(id).ok_or(BattleError::CharacterNotFound(id))
    }

    pub fn require_mut(&mut self, id: CharacterId) -> Result<&mut Character, BattleError> {
        self.get_mut(id).ok_or(BattleError::CharacterNotFound(id))
    }

    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(Character::is_alive)
    }

    /// Everyone except `user`, alive or dead, in enumeration order.
    pub fn others(&self, user: CharacterId) -> Vec<CharacterId> {
        self.characters
            .iter()
            .filter(|c| c.id() != user)
            .map(Character::id)
            .collect()
    }

    pub fn living(&self) -> Vec<CharacterId> {
        self.characters
            .iter()
            .filter(|c| c.is_alive())
            .map(Character::id)
            .collect()
    }

    /// Teams with at least one living member.
    pub fn living_teams(&self) -> BTreeSet<Team> {
        self.characters
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.team().clone())
            .collect()
    }

    /// Display name for an id, or its numeric form if unknown.
    pub fn name_of(&self, id: CharacterId) -> String {
        self.get(id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

impl FromIterator<Character> for Roster {
    fn from_iter<T: IntoIterator<Item = Character>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
