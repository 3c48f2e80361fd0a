use super::SlotId;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by the turn lock.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnLockError {
    #[error("turn already held by {holder}")]
    AlreadyHeld { holder: SlotId },

    #[error("{slot} released a turn it does not hold")]
    NotHolder { slot: SlotId },
}

impl GameError for TurnLockError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnLockError::AlreadyHeld { .. } => "TURN_ALREADY_HELD",
            TurnLockError::NotHolder { .. } => "TURN_NOT_HOLDER",
        }
    }
}

/// Battle-wide mutual exclusion over turns.
///
/// While a combatant holds the lock no initiative or energy advances, for
/// either side. At most one combatant holds it at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnLock {
    holder: Option<SlotId>,
}

impl TurnLock {
    pub fn acquire(&mut self, slot: SlotId) -> Result<(), TurnLockError> {
        match self.holder {
            Some(holder) => Err(TurnLockError::AlreadyHeld { holder }),
            None => {
                self.holder = Some(slot);
                Ok(())
            }
        }
    }

    pub fn release(&mut self, slot: SlotId) -> Result<(), TurnLockError> {
        if self.holder != Some(slot) {
            return Err(TurnLockError::NotHolder { slot });
        }
        self.holder = None;
        Ok(())
    }

    /// Drops the lock regardless of holder. Used when the battle ends.
    pub fn clear(&mut self) {
        self.holder = None;
    }

    pub fn holder(&self) -> Option<SlotId> {
        self.holder
    }

    pub fn is_held(&self) -> bool {
        self.holder.is_some()
    }
}
