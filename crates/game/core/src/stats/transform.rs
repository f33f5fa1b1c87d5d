//! Pure integer transforms contributed by equipment.
//!
//! Transforms are applied in declaration order:
//! - power transforms rewrite an action's declared base power before the
//!   damage calculator runs
//! - stat transforms rewrite a stat's current value on read
//!
//! Chains are owned by whoever installs them and are rebuilt wholesale when
//! equipment changes, never patched in place.

use super::core::StatKind;

/// A pure `i32 -> i32` function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerTransform {
    /// Add a flat amount (may be negative).
    Add(i32),

    /// Scale by a percentage (150 = ×1.5), truncating toward zero.
    Percent(i32),

    /// Raise the value to at least this floor.
    AtLeast(i32),

    /// Lower the value to at most this ceiling.
    AtMost(i32),
}

impl PowerTransform {
    pub fn apply(&self, value: i32) -> i32 {
        match *self {
            Self::Add(amount) => value.saturating_add(amount),
            Self::Percent(percent) => {
                let scaled = i64::from(value) * i64::from(percent) / 100;
                scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
            Self::AtLeast(floor) => value.max(floor),
            Self::AtMost(ceiling) => value.min(ceiling),
        }
    }
}

/// A transform bound to one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTransform {
    pub stat: StatKind,
    pub transform: PowerTransform,
}

impl StatTransform {
    pub fn new(stat: StatKind, transform: PowerTransform) -> Self {
        Self { stat, transform }
    }
}

/// Folds `value` through `chain` in order.
pub fn apply_chain<'a, I>(value: i32, chain: I) -> i32
where
    I: IntoIterator<Item = &'a PowerTransform>,
{
    chain.into_iter().fold(value, |acc, t| t.apply(acc))
}
