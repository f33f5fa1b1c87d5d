//! Move success calculators.

use crate::character::CharacterId;
use crate::env::RandomSource;
use crate::history::{ActionHistory, UseCount};

/// Result of a move's success check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    Success,
    /// An accuracy roll missed.
    Miss,
    /// A use-count based chance failed.
    Failure,
}

impl MoveOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Whether a move-use goes ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuccessCalculator {
    #[default]
    Always,

    /// Succeeds when a percentage roll lands below `percent`; misses otherwise.
    Accuracy { percent: u32 },

    /// Chance starts at `start` percent and moves by `step` for every earlier
    /// use of this move by this user that `counted` accepts, bounded to
    /// `[floor, ceiling]`. Fails otherwise.
    LinearByUses {
        start: i32,
        step: i32,
        floor: i32,
        ceiling: i32,
        counted: UseCount,
    },
}

impl SuccessCalculator {
    pub fn calculate(
        &self,
        move_name: &str,
        user: CharacterId,
        history: &ActionHistory,
        rng: &mut dyn RandomSource,
    ) -> MoveOutcome {
        match *self {
            Self::Always => MoveOutcome::Success,
            Self::Accuracy { percent } => {
                if roll_under(i64::from(percent), rng) {
                    MoveOutcome::Success
                } else {
                    MoveOutcome::Miss
                }
            }
            Self::LinearByUses {
                start,
                step,
                floor,
                ceiling,
                counted,
            } => {
                let uses = history.count_move_outcomes(user, move_name, counted);
                let chance = (i64::from(start) + i64::from(step) * i64::from(uses))
                    .max(i64::from(floor))
                    .min(i64::from(ceiling));
                tracing::debug!(
                    "{} '{}' success chance {}% after {} counted uses",
                    user,
                    move_name,
                    chance,
                    uses
                );
                if roll_under(chance, rng) {
                    MoveOutcome::Success
                } else {
                    MoveOutcome::Failure
                }
            }
        }
    }
}

/// Certain outcomes do not consume a roll.
fn roll_under(chance: i64, rng: &mut dyn RandomSource) -> bool {
    if chance >= 100 {
        return true;
    }
    if chance <= 0 {
        return false;
    }
    i64::from(rng.roll_percent()) < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRandom;
    use crate::history::MoveRecord;

    fn record(history: &mut ActionHistory, user: CharacterId, outcome: MoveOutcome) {
        history.record_move(MoveRecord {
            round: 1,
            user,
            move_name: "Gamble".into(),
            outcome,
        });
    }

    #[test]
    fn accuracy_compares_roll_to_percent() {
        let history = ActionHistory::new();
        let calc = SuccessCalculator::Accuracy { percent: 70 };
        let mut rng = ScriptedRandom::new([69, 70]);

        assert_eq!(
            calc.calculate("Gamble", CharacterId(1), &history, &mut rng),
            MoveOutcome::Success
        );
        assert_eq!(
            calc.calculate("Gamble", CharacterId(1), &history, &mut rng),
            MoveOutcome::Miss
        );
    }

    #[test]
    fn certain_moves_do_not_roll() {
        let history = ActionHistory::new();
        let mut rng = ScriptedRandom::new([0]);
        let calc = SuccessCalculator::Accuracy { percent: 100 };

        assert!(
            calc.calculate("Gamble", CharacterId(1), &history, &mut rng)
                .is_success()
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn linear_chance_decays_with_successes() {
        let user = CharacterId(1);
        let mut history = ActionHistory::new();
        let calc = SuccessCalculator::LinearByUses {
            start: 100,
            step: -50,
            floor: 0,
            ceiling: 100,
            counted: UseCount::Successes,
        };
        // Roll 60: passes at 100%, fails at 50%, fails at 0%.
        let mut rng = ScriptedRandom::new([60]);

        assert_eq!(calc.calculate("Gamble", user, &history, &mut rng), MoveOutcome::Success);
        record(&mut history, user, MoveOutcome::Success);

        assert_eq!(calc.calculate("Gamble", user, &history, &mut rng), MoveOutcome::Failure);
        record(&mut history, user, MoveOutcome::Failure);

        // Failures are not counted, so the chance is still 50%.
        let mut low = ScriptedRandom::new([10]);
        assert_eq!(calc.calculate("Gamble", user, &history, &mut low), MoveOutcome::Success);
    }

    #[test]
    fn linear_chance_respects_bounds() {
        let user = CharacterId(2);
        let mut history = ActionHistory::new();
        for _ in 0..5 {
            record(&mut history, user, MoveOutcome::Failure);
        }
        let calc = SuccessCalculator::LinearByUses {
            start: 20,
            step: 30,
            floor: 0,
            ceiling: 90,
            counted: UseCount::Failures,
        };
        // 20 + 5×30 = 170, capped at 90.
        let mut rng = ScriptedRandom::new([95, 89]);
        assert_eq!(calc.calculate("Gamble", user, &history, &mut rng), MoveOutcome::Failure);
        assert_eq!(calc.calculate("Gamble", user, &history, &mut rng), MoveOutcome::Success);
    }
}
