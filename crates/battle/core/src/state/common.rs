use crate::config::BattleConfig;

/// Stable key of a monster inside a roster.
pub type RosterIndex = usize;

/// One of the two parties in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Readiness scan order: opponents are checked before the player.
    pub const SCAN_ORDER: [Side; 2] = [Side::Opponent, Side::Player];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Address of an active slot: a side plus a position in `0..MAX_ACTIVE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId {
    pub side: Side,
    pub position: usize,
}

impl SlotId {
    pub const fn new(side: Side, position: usize) -> Self {
        Self { side, position }
    }

    pub const fn player(position: usize) -> Self {
        Self::new(Side::Player, position)
    }

    pub const fn opponent(position: usize) -> Self {
        Self::new(Side::Opponent, position)
    }

    pub const fn is_valid(&self) -> bool {
        self.position < BattleConfig::MAX_ACTIVE
    }

    /// Dense numeric id, distinct for every slot of both sides.
    pub const fn code(&self) -> u32 {
        let side = match self.side {
            Side::Player => 0,
            Side::Opponent => 1,
        };
        (side * BattleConfig::MAX_ACTIVE + self.position) as u32
    }
}

impl core::fmt::Display for SlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.side, self.position)
    }
}
