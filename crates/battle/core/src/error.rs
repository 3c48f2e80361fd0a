//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`BattleError`, `TurnLockError`, `RosterError`) live
//! next to the code that produces them. This module holds the shared severity
//! classification they all report through [`GameError`].
//!
//! Most battle failures are prevented structurally: menu options are only
//! offered when their candidate set is non-empty, and guarded transitions are
//! turned into no-ops by the session. The errors exist so those guards have
//! something precise to log.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the input can simply be ignored.
    ///
    /// Examples: committing while nobody holds the turn
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: entering a menu with no candidates
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: cursor outside its list, slot pointing at a missing roster entry
    Internal,

    /// Fatal error - battle state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
