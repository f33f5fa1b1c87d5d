//! Common error infrastructure for battle-core.
//!
//! Battle logic distinguishes two tiers of failure:
//!
//! - **Soft failures** are ordinary battle outcomes (no valid targets, a full
//!   protect queue, a missed move, an exhausted move). They are encoded in
//!   return values and never surface as errors.
//! - **Hard failures** signal misuse of the API (consuming a protect from an
//!   empty queue, resolving an action whose targets were never established, an
//!   unknown stat key). They are reported through [`BattleError`] and abort the
//!   operation that detected them.

use crate::character::CharacterId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Every [`BattleError`] is a broken contract, so none of them is retried:
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted battle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown stat key in content, out-of-range choice index
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: action resolved before its targets were set.
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - battle state corrupted, cannot continue.
    ///
    /// Examples: protect consumed from an empty queue
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Hard failures raised by the battle engine.
///
/// None of these occur under correct orchestration; each one means a caller
/// broke an API contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// `consume_protect` was called while the protect queue was empty.
    #[error("character {character} has no protector queued")]
    EmptyProtectQueue { character: CharacterId },

    /// An action with a static target calculator was resolved before
    /// `set_targets` established its targets.
    #[error("action '{action}' was used before its targets were set")]
    TargetsNotSet { action: String },

    /// A buff payload named a stat that does not exist.
    #[error("unknown stat '{0}'")]
    UnknownStat(String),

    /// Character id not present in the roster.
    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),

    /// Move slot not present in the character's move set.
    #[error("character {character} has no move in slot {slot}")]
    MoveNotFound { character: CharacterId, slot: usize },

    /// A choice provider returned an index outside the offered options.
    #[error("choice index {index} out of range for {len} options")]
    InvalidChoice { index: usize, len: usize },
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            EmptyProtectQueue { .. } => ErrorSeverity::Fatal,
            TargetsNotSet { .. } => ErrorSeverity::Internal,
            UnknownStat(_) | InvalidChoice { .. } => ErrorSeverity::Validation,
            CharacterNotFound(_) | MoveNotFound { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            EmptyProtectQueue { .. } => "BATTLE_EMPTY_PROTECT_QUEUE",
            TargetsNotSet { .. } => "BATTLE_TARGETS_NOT_SET",
            UnknownStat(_) => "BATTLE_UNKNOWN_STAT",
            CharacterNotFound(_) => "BATTLE_CHARACTER_NOT_FOUND",
            MoveNotFound { .. } => "BATTLE_MOVE_NOT_FOUND",
            InvalidChoice { .. } => "BATTLE_INVALID_CHOICE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_failures_are_internal_or_fatal() {
        let empty = BattleError::EmptyProtectQueue {
            character: CharacterId(3),
        };
        assert_eq!(empty.severity(), ErrorSeverity::Fatal);
        assert!(empty.severity().is_internal());

        let unset = BattleError::TargetsNotSet {
            action: "Tackle".into(),
        };
        assert!(unset.severity().is_internal());
        assert_eq!(unset.error_code(), "BATTLE_TARGETS_NOT_SET");
    }

    #[test]
    fn unknown_stat_is_a_validation_error() {
        let err = BattleError::UnknownStat("luck".into());
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.to_string(), "unknown stat 'luck'");
        assert_eq!(err.severity().as_str(), "validation");
        assert!(!err.severity().is_internal());
    }
}
