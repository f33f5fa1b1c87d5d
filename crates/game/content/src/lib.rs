//! Data-driven content definitions and loaders.
//!
//! This crate houses battle content and provides loaders for RON/TOML data files:
//! - Rosters: characters with their moves and equipment (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//! - A built-in demo roster expressed directly as configuration structs
//!
//! All loaders use battle-core configuration types directly with serde.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::default_roster;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, RosterLoader};
