//! Action execution.
//!
//! - **Context**: [`ActionContext`] borrows the roster, history and
//!   collaborators for one move-use or item trigger
//! - **Effects**: one application helper per action variant
//!
//! Targeting and calculators read through the same context, so a single
//! borrow of the battle state flows through declaration, success check and
//! every action of a move.

mod context;
mod effects;

pub use context::ActionContext;

pub(crate) use effects::{apply_buff, apply_damage, apply_heal, apply_protect, apply_protect_limit};
