//! Terminal front end for the battle engine.
//!
//! ```text
//! main
//!   ├─→ CliConfig        (environment)
//!   ├─→ BattleBuilder    (roster + config files, seed, choice provider)
//!   └─→ Battle::run      ──→ TextPresenter (stdout)
//! ```
//!
//! Logging goes to stderr so stdout carries only the battle log.

mod builder;
pub mod config;
pub mod input;
pub mod presenter;

pub use builder::BattleBuilder;
pub use config::CliConfig;
pub use input::StdinChoiceProvider;
pub use presenter::TextPresenter;
