//! Stat System.
//!
//! Every character owns exactly three stats (Attack, Defence, Speed). Each stat
//! is a base value plus an additive multiplier:
//!
//! ```text
//! current = round(base × (1 + multiplier))
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Only `base_value` and `multiplier` are stored
//! 2. **No caching**: `current_value` is recomputed on every read
//! 3. **No decay**: Multipliers accumulate for the lifetime of a battle
//!
//! ## Transforms
//!
//! Equipment contributes ordered chains of pure integer transforms, applied on
//! top of the stored stats (stat transforms) or to an action's declared power
//! (power transforms). See [`transform`].

pub mod core;
pub mod transform;

// Re-export primary types
pub use self::core::{Stat, StatDelta, StatKind, StatSet};
pub use transform::{PowerTransform, StatTransform, apply_chain};
