//! Round queue ordering.

use std::cmp::Reverse;

use crate::character::Roster;
use crate::moves::MoveUse;
use crate::stats::StatKind;

/// Orders declared move-uses for resolution.
///
/// Priority descending, then the user's current speed descending. The sort is
/// stable, so full ties keep roster order.
pub(crate) fn order_queue(queue: &mut [MoveUse], roster: &Roster) {
    queue.sort_by_key(|move_use| {
        let speed = roster
            .get(move_use.user())
            .map(|character| character.stat(StatKind::Speed))
            .unwrap_or(i32::MIN);
        (Reverse(move_use.priority()), Reverse(speed))
    });

    tracing::debug!(
        "resolution order: {:?}",
        queue
            .iter()
            .map(|move_use| (move_use.user(), move_use.move_name()))
            .collect::<Vec<_>>()
    );
}
