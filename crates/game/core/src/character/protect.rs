//! Protect queue: pending protectors shielding the next incoming hits.
//!
//! The queue is FIFO. The earliest-queued protector absorbs the next hit.

use std::collections::VecDeque;

use super::CharacterId;

/// Result of offering a protector to a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProtectOutcome {
    /// The protector was appended to the back of the queue.
    Added,
    /// The queue was already at its limit; nothing changed.
    Rejected,
}

impl ProtectOutcome {
    pub fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Bounded FIFO of protector ids.
///
/// Invariant: `len() <= effective_limit()` after every `push`. Lowering the
/// limit never evicts protectors already queued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtectQueue {
    queue: VecDeque<CharacterId>,
    limit: i32,
}

impl ProtectQueue {
    pub fn new(limit: i32) -> Self {
        Self {
            queue: VecDeque::new(),
            limit,
        }
    }

    /// Raw limit as configured and adjusted; may be negative.
    pub fn limit(&self) -> i32 {
        self.limit
    }

    /// Limit used for queueing decisions. Negative limits count as zero.
    pub fn effective_limit(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued protectors, front (next to protect) first.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterId> {
        self.queue.iter()
    }

    pub fn push(&mut self, protector: CharacterId) -> ProtectOutcome {
        if self.queue.len() < self.effective_limit() {
            self.queue.push_back(protector);
            ProtectOutcome::Added
        } else {
            ProtectOutcome::Rejected
        }
    }

    pub fn pop(&mut self) -> Option<CharacterId> {
        self.queue.pop_front()
    }

    /// Adds a signed delta to the limit and returns the new raw limit.
    pub fn change_limit(&mut self, delta: i32) -> i32 {
        self.limit = self.limit.saturating_add(delta);
        self.limit
    }
}
