//! Healing calculators.

use super::percent_of;
use crate::character::Character;

/// How much health a heal action offers a target.
///
/// The figure is a request; `Character::heal` clamps it to missing health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealCalculator {
    Absolute(u32),
    /// Percentage of the target's max health, rounded.
    MaxHealthPercent(u32),
}

impl HealCalculator {
    pub fn calculate(&self, target: &Character) -> u32 {
        match *self {
            Self::Absolute(amount) => amount,
            Self::MaxHealthPercent(percent) => {
                let max = u64::try_from(target.max_health()).unwrap_or(0);
                u32::try_from(percent_of(max, percent)).unwrap_or(u32::MAX)
            }
        }
    }
}
