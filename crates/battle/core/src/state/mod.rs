//! Authoritative battle state.
//!
//! Rosters, active slots, the turn lock, menu state and pending timers all
//! live here. Callers read it freely; mutation goes through the engine.
mod common;
mod roster;
mod selection;
mod slots;
mod timers;
mod turn;

pub use common::{RosterIndex, Side, SlotId};
pub use roster::{Roster, RosterError};
pub use selection::{Cursors, MenuInput, MenuOption, MenuOptions, SelectionMode, SelectionState};
pub use slots::{ActiveSlot, PendingAttack, SideSlots, SlotStatus};
pub use timers::{DeferredTask, ScheduledTask, TaskQueue};
pub use turn::{TurnLock, TurnLockError};

use crate::event::BattleEvent;
use crate::monster::Monster;

/// Battle lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    Setup,
    InProgress,
    Victory,
    Defeat,
    Terminated,
}

impl BattlePhase {
    /// True once an outcome has been decided.
    pub fn is_over(self) -> bool {
        !matches!(self, BattlePhase::Setup | BattlePhase::InProgress)
    }
}

/// How a finished battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleResult {
    Victory,
    Defeat,
}

/// Who the player is fighting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encounter {
    /// Wild monsters; catching is allowed.
    #[default]
    Wild,
    /// A named trainer, reported to the victory hook.
    Trainer(String),
}

impl Encounter {
    pub fn trainer(&self) -> Option<&str> {
        match self {
            Encounter::Wild => None,
            Encounter::Trainer(name) => Some(name),
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Encounter::Wild)
    }
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleState {
    pub encounter: Encounter,
    pub phase: BattlePhase,
    /// Set when the battle leaves `InProgress`; survives `Terminated`.
    pub result: Option<BattleResult>,

    player_roster: Roster,
    opponent_roster: Roster,
    player_slots: SideSlots,
    opponent_slots: SideSlots,

    /// Holder of the current turn, if any.
    pub turn: TurnLock,
    pub selection: SelectionState,
    pub timers: TaskQueue,
    /// Set while the "catch blocked" cue is visible.
    pub catch_blocked: bool,
    /// Decision counter mixed into policy seeds.
    pub nonce: u64,
    /// Events produced since the last drain.
    pub events: Vec<BattleEvent>,
}

impl BattleState {
    pub fn new(player_roster: Roster, opponent_roster: Roster, encounter: Encounter) -> Self {
        Self {
            encounter,
            phase: BattlePhase::Setup,
            result: None,
            player_roster,
            opponent_roster,
            player_slots: SideSlots::default(),
            opponent_slots: SideSlots::default(),
            turn: TurnLock::default(),
            selection: SelectionState::default(),
            timers: TaskQueue::default(),
            catch_blocked: false,
            nonce: 0,
            events: Vec::new(),
        }
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Player => &self.player_roster,
            Side::Opponent => &self.opponent_roster,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Player => &mut self.player_roster,
            Side::Opponent => &mut self.opponent_roster,
        }
    }

    pub fn slots(&self, side: Side) -> &SideSlots {
        match side {
            Side::Player => &self.player_slots,
            Side::Opponent => &self.opponent_slots,
        }
    }

    pub fn slots_mut(&mut self, side: Side) -> &mut SideSlots {
        match side {
            Side::Player => &mut self.player_slots,
            Side::Opponent => &mut self.opponent_slots,
        }
    }

    pub fn slot(&self, id: SlotId) -> Option<&ActiveSlot> {
        self.slots(id.side).get(id.position)
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut ActiveSlot> {
        self.slots_mut(id.side).get_mut(id.position)
    }

    /// The monster occupying a slot.
    pub fn monster(&self, id: SlotId) -> Option<&Monster> {
        let slot = self.slot(id)?;
        self.roster(id.side).get(slot.roster_index)
    }

    pub fn monster_mut(&mut self, id: SlotId) -> Option<&mut Monster> {
        let index = self.slot(id)?.roster_index;
        self.roster_mut(id.side).get_mut(index)
    }

    /// Combatant currently holding the turn.
    pub fn acting(&self) -> Option<SlotId> {
        self.turn.holder()
    }

    /// Slots that can act or be targeted: occupied, not leaving, health left.
    /// Position order.
    pub fn live_slots(&self, side: Side) -> Vec<SlotId> {
        self.slots(side)
            .iter()
            .filter(|(_, slot)| !slot.is_leaving())
            .map(|(position, _)| SlotId::new(side, position))
            .filter(|id| self.monster(*id).is_some_and(Monster::is_alive))
            .collect()
    }

    pub fn has_live_combatants(&self, side: Side) -> bool {
        !self.live_slots(side).is_empty()
    }

    /// Roster entries of `side` that could enter the field: alive and not
    /// occupying any slot (leaving ones included). Ascending index order.
    pub fn eligible_reserves(&self, side: Side) -> Vec<RosterIndex> {
        let active = self.slots(side).roster_indices();
        self.roster(side).eligible_reserves(&active).collect()
    }

    /// A side is out once nothing on the field can fight and nothing is left
    /// to send in.
    pub fn is_out(&self, side: Side) -> bool {
        !self.has_live_combatants(side) && self.eligible_reserves(side).is_empty()
    }

    pub fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Splits the state back into its rosters.
    pub fn into_rosters(self) -> (Roster, Roster) {
        (self.player_roster, self.opponent_roster)
    }
}
