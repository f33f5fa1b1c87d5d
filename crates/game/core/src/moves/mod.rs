//! Moves and their per-round use.
//!
//! A [`Move`] is an ordered list of actions with a use budget, a priority and
//! a success calculator. Each round a character's choice becomes a
//! [`MoveUse`], which is declared during the choice phase and resolved once
//! the queue is ordered.

mod move_use;

pub use move_use::{MoveUse, MoveUseResult};

use crate::action::{ActionConfig, SuccessCalculator};

/// Declarative description of a move.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveConfig {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub max_uses: u32,
    /// Higher resolves first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub success: SuccessCalculator,
    /// Run in order.
    pub actions: Vec<ActionConfig>,
}

impl MoveConfig {
    pub fn new(name: impl Into<String>, max_uses: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            max_uses,
            priority: 0,
            success: SuccessCalculator::Always,
            actions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_success(mut self, success: SuccessCalculator) -> Self {
        self.success = success;
        self
    }

    pub fn with_action(mut self, action: ActionConfig) -> Self {
        self.actions.push(action);
        self
    }
}

/// A move owned by one character.
///
/// `0 <= remaining_uses <= max_uses` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    config: MoveConfig,
    remaining_uses: u32,
}

impl Move {
    pub fn new(config: MoveConfig) -> Self {
        Self {
            remaining_uses: config.max_uses,
            config,
        }
    }

    pub fn config(&self) -> &MoveConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn description(&self) -> &str {
        &self.config.description
    }

    pub fn max_uses(&self) -> u32 {
        self.config.max_uses
    }

    pub fn remaining_uses(&self) -> u32 {
        self.remaining_uses
    }

    pub fn priority(&self) -> i32 {
        self.config.priority
    }

    pub fn success(&self) -> SuccessCalculator {
        self.config.success
    }

    pub fn actions(&self) -> &[ActionConfig] {
        &self.config.actions
    }

    pub fn can_use(&self) -> bool {
        self.remaining_uses > 0
    }

    /// Spends one use. Returns false, changing nothing, when none are left.
    pub fn consume_use(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.remaining_uses -= 1;
        true
    }
}
