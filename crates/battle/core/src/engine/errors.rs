//! Errors surfaced by battle engine operations.

use crate::env::AbilityId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    MenuOption, RosterError, RosterIndex, SelectionMode, Side, SlotId, TurnLockError,
};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BattleError {
    /// A cursor pointed outside the list it indexes.
    #[error("cursor {cursor} out of range for {mode} list of {len}")]
    InvalidSelection {
        mode: SelectionMode,
        cursor: usize,
        len: usize,
    },

    #[error("no valid targets on the {side} side")]
    EmptyTargetSet { side: Side },

    /// Input arrived while no player combatant holds the turn.
    #[error("no player combatant is acting")]
    NoActiveCombatant,

    #[error("{slot} does not hold the turn")]
    NotActing { slot: SlotId },

    #[error("menu option {option} is disabled")]
    OptionDisabled { option: MenuOption },

    #[error("{ability} is not usable by {slot}")]
    AbilityUnavailable { slot: SlotId, ability: AbilityId },

    #[error("{target} cannot be targeted")]
    InvalidTarget { target: SlotId },

    #[error("roster entry {index} cannot be sent out")]
    IneligibleReserve { index: RosterIndex },

    #[error("{slot} has no monster")]
    EmptySlot { slot: SlotId },

    #[error("{slot} has no attack in flight")]
    NoPendingAttack { slot: SlotId },

    #[error(transparent)]
    TurnLock(#[from] TurnLockError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl BattleError {
    pub fn invalid_selection(mode: SelectionMode, cursor: usize, len: usize) -> Self {
        debug_assert!(false, "cursor {cursor} out of range for {mode} list of {len}");
        Self::InvalidSelection { mode, cursor, len }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            NoActiveCombatant => ErrorSeverity::Recoverable,

            EmptyTargetSet { .. }
            | OptionDisabled { .. }
            | AbilityUnavailable { .. }
            | InvalidTarget { .. }
            | IneligibleReserve { .. } => ErrorSeverity::Validation,

            InvalidSelection { .. }
            | NotActing { .. }
            | EmptySlot { .. }
            | NoPendingAttack { .. } => ErrorSeverity::Internal,

            TurnLock(err) => err.severity(),
            Roster(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            InvalidSelection { .. } => "BATTLE_INVALID_SELECTION",
            EmptyTargetSet { .. } => "BATTLE_EMPTY_TARGET_SET",
            NoActiveCombatant => "BATTLE_NO_ACTIVE_COMBATANT",
            NotActing { .. } => "BATTLE_NOT_ACTING",
            OptionDisabled { .. } => "BATTLE_OPTION_DISABLED",
            AbilityUnavailable { .. } => "BATTLE_ABILITY_UNAVAILABLE",
            InvalidTarget { .. } => "BATTLE_INVALID_TARGET",
            IneligibleReserve { .. } => "BATTLE_INELIGIBLE_RESERVE",
            EmptySlot { .. } => "BATTLE_EMPTY_SLOT",
            NoPendingAttack { .. } => "BATTLE_NO_PENDING_ATTACK",
            TurnLock(err) => err.error_code(),
            Roster(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_classification() {
        let err: BattleError = RosterError::Missing { index: 3 }.into();
        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert_eq!(err.error_code(), "ROSTER_MISSING");
    }

    #[test]
    fn guarded_input_is_recoverable() {
        assert!(BattleError::NoActiveCombatant.severity().is_recoverable());
        assert_eq!(
            BattleError::EmptyTargetSet {
                side: Side::Opponent
            }
            .to_string(),
            "no valid targets on the opponent side"
        );
    }
}
