//! Read-only snapshot of a battle for renderers and observers.

use crate::env::{Element, Species};
use crate::monster::MonsterInfo;
use crate::state::{
    BattlePhase, BattleResult, BattleState, RosterIndex, SelectionState, Side, SlotId, SlotStatus,
};

/// One occupied slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotView {
    pub slot: SlotId,
    pub roster_index: RosterIndex,
    pub species: Species,
    pub element: Element,
    pub level: u32,
    pub info: MonsterInfo,
    pub status: SlotStatus,
    pub highlighted: bool,
    pub defending: bool,
}

/// One roster entry, on the field or not.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntryView {
    pub side: Side,
    pub index: RosterIndex,
    pub species: Species,
    pub level: u32,
    pub xp: f64,
    pub health: (f64, f64),
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleView {
    pub phase: BattlePhase,
    pub result: Option<BattleResult>,
    pub acting: Option<SlotId>,
    pub selection: SelectionState,
    pub catch_blocked: bool,
    /// Occupied slots, player side first, each in position order.
    pub slots: Vec<SlotView>,
    pub rosters: Vec<RosterEntryView>,
}

impl BattleView {
    pub fn capture(state: &BattleState) -> Self {
        let sides = [Side::Player, Side::Opponent];

        let slots = sides
            .into_iter()
            .flat_map(|side| {
                state.slots(side).iter().filter_map(move |(position, slot)| {
                    let id = SlotId::new(side, position);
                    let monster = state.monster(id)?;
                    Some(SlotView {
                        slot: id,
                        roster_index: slot.roster_index,
                        species: monster.species(),
                        element: monster.element(),
                        level: monster.level(),
                        info: monster.info(),
                        status: slot.status,
                        highlighted: slot.highlighted,
                        defending: monster.defending,
                    })
                })
            })
            .collect();

        let rosters = sides
            .into_iter()
            .flat_map(|side| {
                let active = state.slots(side).roster_indices();
                state.roster(side).iter().map(move |(index, monster)| RosterEntryView {
                    side,
                    index,
                    species: monster.species(),
                    level: monster.level(),
                    xp: monster.xp,
                    health: (monster.health, monster.max_health()),
                    active: active.contains(&index),
                })
            })
            .collect();

        Self {
            phase: state.phase,
            result: state.result,
            acting: state.acting(),
            selection: state.selection,
            catch_blocked: state.catch_blocked,
            slots,
            rosters,
        }
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotView> {
        self.slots.iter().find(|view| view.slot == id)
    }
}
