//! Initiative scheduling: who acts next.

use crate::event::BattleEvent;
use crate::monster::Monster;
use crate::state::{DeferredTask, MenuOptions, Side, SlotId};

use super::{BattleEngine, BattleError};

impl<'a> BattleEngine<'a> {
    /// Advances every combatant on the field by `dt` seconds.
    ///
    /// Meters and energy stay frozen while anyone holds the turn.
    pub fn tick_monsters(&mut self, dt: f64) {
        let paused = self.state.turn.is_held();
        for side in [Side::Player, Side::Opponent] {
            for index in self.state.slots(side).roster_indices() {
                if let Some(monster) = self.state.roster_mut(side).get_mut(index) {
                    monster.tick(dt, paused);
                }
            }
        }
    }

    /// First ready combatant in scan order, if a turn can be granted at all.
    ///
    /// Opponents are scanned before the player, each side in position order.
    /// Nobody is granted a turn while one is held or while either side has
    /// nothing left on the field.
    pub fn next_ready(&self) -> Option<SlotId> {
        if self.state.turn.is_held()
            || !self.state.has_live_combatants(Side::Player)
            || !self.state.has_live_combatants(Side::Opponent)
        {
            return None;
        }

        Side::SCAN_ORDER.into_iter().find_map(|side| {
            self.state
                .live_slots(side)
                .into_iter()
                .find(|id| self.state.monster(*id).is_some_and(Monster::is_ready))
        })
    }

    /// Hands the turn to `slot`.
    ///
    /// Acquires the turn lock, resets the actor's meter and defend flag, then
    /// opens the player menu or schedules the opponent policy.
    pub fn grant_turn(&mut self, slot: SlotId) -> Result<(), BattleError> {
        self.state.turn.acquire(slot)?;

        let monster = self
            .state
            .monster_mut(slot)
            .ok_or(BattleError::EmptySlot { slot })?;
        monster.initiative = 0.0;
        monster.defending = false;

        tracing::debug!(%slot, "turn granted");
        self.state.emit(BattleEvent::TurnGranted { slot });

        match slot.side {
            Side::Player => {
                let enabled = self.general_options(slot);
                self.state.selection.open(enabled);
            }
            Side::Opponent => self
                .state
                .timers
                .schedule(self.config.opponent_delay_ms, DeferredTask::OpponentTurn(slot)),
        }
        Ok(())
    }

    /// Runs the readiness scan and grants the turn to the winner.
    pub fn scan_and_grant(&mut self) -> Result<Option<SlotId>, BattleError> {
        match self.next_ready() {
            Some(slot) => {
                self.grant_turn(slot)?;
                Ok(Some(slot))
            }
            None => Ok(None),
        }
    }

    /// General-menu entries that have at least one candidate for `actor`.
    pub fn general_options(&self, actor: SlotId) -> MenuOptions {
        let mut enabled = MenuOptions::DEFEND;
        if !self.attack_options(actor).is_empty() {
            enabled |= MenuOptions::ATTACK;
        }
        if !self.state.eligible_reserves(actor.side).is_empty() {
            enabled |= MenuOptions::SWITCH;
        }
        if self.state.encounter.is_wild() && self.state.has_live_combatants(actor.side.opposite()) {
            enabled |= MenuOptions::CATCH;
        }
        enabled
    }
}
