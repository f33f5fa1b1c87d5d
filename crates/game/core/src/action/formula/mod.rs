//! Numeric calculators for actions and moves.
//!
//! Calculators answer "by how much" (damage, healing) and "whether" (move
//! success). They are plain data, so a move's whole behavior can be written in
//! a content file:
//!
//! ```ignore
//! // 150% of the last hit the user took, aimed at whoever dealt it
//! ActionConfig::damage(
//!     TargetCalculator::LastAttacker,
//!     0,
//!     DamageCalculator::LastReceivedPercent { percent: 150 },
//! )
//! .with_tag(RETALIATION_TAG)
//! ```
//!
//! Damage and success calculators may read [`ActionHistory`](crate::history::ActionHistory);
//! none of them mutate anything.

pub mod damage;
pub mod heal;
pub mod success;

pub use damage::{DamageCalculator, DamageRoll, HealthBasis};
pub use heal::HealCalculator;
pub use success::{MoveOutcome, SuccessCalculator};

/// `round(value × percent / 100)` for non-negative inputs.
pub(crate) fn percent_of(value: u64, percent: u32) -> u64 {
    (value * u64::from(percent) + 50) / 100
}

/// Saturating conversion for computed amounts.
pub(crate) fn to_amount(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
