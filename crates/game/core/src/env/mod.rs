//! Capabilities injected into the engine from outside.
//!
//! The engine never reaches for global randomness or blocking input. Both are
//! handed in as trait objects so a battle can be replayed exactly from a fixed
//! random stream and a scripted set of choices.
mod choice;
mod rng;

pub use choice::{ChoiceProvider, FirstChoice, MoveOption, ScriptedChoices};
pub use rng::{PcgRandom, RandomSource, ScriptedRandom};
