//! Move selection for scripted characters.

use crate::character::ScriptedPolicy;
use crate::env::RandomSource;

/// Picks a slot from `usable`, or `None` when it is empty.
pub(crate) fn choose_slot(
    policy: ScriptedPolicy,
    usable: &[usize],
    round: u32,
    rng: &mut dyn RandomSource,
) -> Option<usize> {
    if usable.is_empty() {
        return None;
    }
    let index = match policy {
        ScriptedPolicy::FirstUsable => 0,
        ScriptedPolicy::Random => {
            let bound = u32::try_from(usable.len()).unwrap_or(u32::MAX);
            rng.next_in_range(0, bound) as usize
        }
        ScriptedPolicy::Cycle => round.saturating_sub(1) as usize % usable.len(),
    };
    usable.get(index).copied()
}
