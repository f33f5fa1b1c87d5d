//! Equipment.
//!
//! An item is pure data: optional start-of-round and end-of-round actions,
//! plus transform chains that apply while it is equipped.

use crate::action::ActionConfig;
use crate::stats::{PowerTransform, StatTransform};

/// Equippable item definition.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Item {
    pub name: String,
    pub description: String,

    /// Executed once per round before moves are chosen.
    pub start_of_turn: Option<ActionConfig>,

    /// Executed once per round after every move has resolved.
    pub end_of_turn: Option<ActionConfig>,

    /// Applied to the base power of every damage action the wearer uses.
    pub power_transforms: Vec<PowerTransform>,

    /// Applied to the wearer's stats on read.
    pub stat_transforms: Vec<StatTransform>,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start_of_turn(mut self, action: ActionConfig) -> Self {
        self.start_of_turn = Some(action);
        self
    }

    #[must_use]
    pub fn with_end_of_turn(mut self, action: ActionConfig) -> Self {
        self.end_of_turn = Some(action);
        self
    }

    #[must_use]
    pub fn with_power_transform(mut self, transform: PowerTransform) -> Self {
        self.power_transforms.push(transform);
        self
    }

    #[must_use]
    pub fn with_stat_transform(mut self, transform: StatTransform) -> Self {
        self.stat_transforms.push(transform);
        self
    }
}
