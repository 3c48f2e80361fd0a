//! Active combatant slots.

use arrayvec::ArrayVec;

use super::{RosterIndex, SlotId};
use crate::config::BattleConfig;
use crate::env::AbilityId;

/// Lifecycle of an occupied slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SlotStatus {
    #[default]
    Fighting,
    /// Health reached zero; the slot is cleared when the removal timer fires.
    Fainting,
    /// Caught by the player; moves to the player roster on removal.
    Caught,
}

/// Ability committed by the slot's occupant, waiting for its impact timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAttack {
    pub ability: AbilityId,
    pub target: SlotId,
}

/// A roster member currently on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSlot {
    pub roster_index: RosterIndex,
    pub status: SlotStatus,
    pub pending: Option<PendingAttack>,
    /// Set while the hit highlight is showing.
    pub highlighted: bool,
}

impl ActiveSlot {
    pub fn new(roster_index: RosterIndex) -> Self {
        Self {
            roster_index,
            status: SlotStatus::Fighting,
            pending: None,
            highlighted: false,
        }
    }

    /// True once the occupant is on its way out (fainted or caught).
    pub fn is_leaving(&self) -> bool {
        self.status != SlotStatus::Fighting
    }
}

/// The fixed-size row of slots belonging to one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideSlots {
    slots: [Option<ActiveSlot>; BattleConfig::MAX_ACTIVE],
}

impl SideSlots {
    pub fn get(&self, position: usize) -> Option<&ActiveSlot> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut ActiveSlot> {
        self.slots.get_mut(position).and_then(Option::as_mut)
    }

    /// Puts a fresh occupant at `position`, returning the previous one.
    pub fn place(&mut self, position: usize, roster_index: RosterIndex) -> Option<ActiveSlot> {
        self.slots
            .get_mut(position)
            .and_then(|slot| slot.replace(ActiveSlot::new(roster_index)))
    }

    pub fn clear(&mut self, position: usize) -> Option<ActiveSlot> {
        self.slots.get_mut(position).and_then(Option::take)
    }

    /// Occupied slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ActiveSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_ref().map(|slot| (position, slot)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut ActiveSlot)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_mut().map(|slot| (position, slot)))
    }

    /// Roster indices of every occupant, leaving ones included.
    pub fn roster_indices(&self) -> ArrayVec<RosterIndex, { BattleConfig::MAX_ACTIVE }> {
        self.iter().map(|(_, slot)| slot.roster_index).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_and_clear_track_positions() {
        let mut slots = SideSlots::default();
        assert!(slots.is_empty());

        slots.place(2, 7);
        slots.place(0, 4);
        let order: Vec<_> = slots.iter().map(|(pos, slot)| (pos, slot.roster_index)).collect();
        assert_eq!(order, vec![(0, 4), (2, 7)]);
        assert_eq!(slots.roster_indices().as_slice(), &[4, 7]);

        assert_eq!(slots.clear(0).map(|slot| slot.roster_index), Some(4));
        assert!(slots.get(0).is_none());
        assert!(slots.place(5, 1).is_none());
    }

    #[test]
    fn leaving_status() {
        let mut slot = ActiveSlot::new(0);
        assert!(!slot.is_leaving());
        slot.status = SlotStatus::Caught;
        assert!(slot.is_leaving());
    }
}
