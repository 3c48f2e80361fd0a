//! Battle rules applied to [`BattleState`].
//!
//! [`BattleEngine`] is the only writer of battle state. It is a thin borrow
//! over the state and its configuration; the session builds one per tick and
//! drives it through the fixed tick order. The operations are split by
//! concern:
//!
//! - `turns`: meter advancement, readiness scan, turn grants
//! - `selection`: player menu navigation
//! - `resolver`: committed actions, faints, experience, replacements
//! - `timers`: deferred task dispatch

mod errors;
mod hook;
mod resolver;
mod selection;
mod timers;
mod turns;

pub use errors::BattleError;
pub use hook::{BattleObserver, EndOfBattleHook, NoopHook};

use crate::config::BattleConfig;
use crate::event::BattleEvent;
use crate::state::{
    BattlePhase, BattleResult, BattleState, DeferredTask, Side, SlotId, TaskQueue,
};

pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Sends out the first alive roster entries of each side and starts the
    /// battle. Does nothing once the battle has started.
    pub fn setup(&mut self) {
        if self.state.phase != BattlePhase::Setup {
            return;
        }

        for side in [Side::Player, Side::Opponent] {
            let starters = self.state.eligible_reserves(side);
            for (position, index) in starters
                .into_iter()
                .take(BattleConfig::MAX_ACTIVE)
                .enumerate()
            {
                self.state.slots_mut(side).place(position, index);
                if let Some(monster) = self.state.roster(side).get(index) {
                    let species = monster.species();
                    self.state.emit(BattleEvent::SentOut {
                        slot: SlotId::new(side, position),
                        roster_index: index,
                        species,
                    });
                }
            }
        }

        self.state.phase = BattlePhase::InProgress;
        self.state.emit(BattleEvent::Started);
        tracing::info!(
            encounter = ?self.state.encounter,
            player = self.state.slots(Side::Player).roster_indices().len(),
            opponent = self.state.slots(Side::Opponent).roster_indices().len(),
            "battle started"
        );
    }

    /// End-of-battle check, run first on every tick.
    ///
    /// `InProgress` moves to `Victory` or `Defeat` once a side is out of
    /// combatants; a decided battle moves to `Terminated` on the following
    /// check. Returns the phase after the check.
    pub fn check_end(&mut self, hook: &mut dyn EndOfBattleHook) -> BattlePhase {
        match self.state.phase {
            BattlePhase::Victory | BattlePhase::Defeat => {
                self.state.phase = BattlePhase::Terminated;
                tracing::debug!("battle terminated");
            }
            BattlePhase::InProgress => {
                if self.state.is_out(Side::Opponent) {
                    self.finish(BattleResult::Victory, hook);
                } else if self.state.is_out(Side::Player) {
                    self.finish(BattleResult::Defeat, hook);
                }
            }
            BattlePhase::Setup | BattlePhase::Terminated => {}
        }
        self.state.phase
    }

    fn finish(&mut self, result: BattleResult, hook: &mut dyn EndOfBattleHook) {
        self.state.turn.clear();
        self.state.selection.close();
        self.flush_timers();

        match result {
            BattleResult::Victory => {
                for (roster_index, from, into) in self.state.roster_mut(Side::Player).evolve_ready() {
                    self.state.emit(BattleEvent::Evolved {
                        side: Side::Player,
                        roster_index,
                        from,
                        into,
                    });
                }
                let trainer = self.state.encounter.trainer().map(str::to_owned);
                tracing::info!(trainer = ?trainer, "victory");
                hook.on_victory(trainer.as_deref());
                self.state.phase = BattlePhase::Victory;
                self.state.emit(BattleEvent::Victory { trainer });
            }
            BattleResult::Defeat => {
                tracing::info!("defeat");
                hook.on_defeat();
                self.state.phase = BattlePhase::Defeat;
                self.state.emit(BattleEvent::Defeat);
            }
        }
        self.state.result = Some(result);
    }

    /// Carries out pending removals without sending in replacements and
    /// drops every other timer.
    fn flush_timers(&mut self) {
        let removals = self
            .state
            .timers
            .take_where(|task| matches!(task, DeferredTask::RemoveSlot(_)));
        for task in removals {
            if let DeferredTask::RemoveSlot(slot) = task {
                if let Err(err) = self.remove_slot(slot, false) {
                    tracing::error!(%slot, %err, "failed to flush removal");
                }
            }
        }
        self.state.timers = TaskQueue::default();
        self.state.catch_blocked = false;
        for side in [Side::Player, Side::Opponent] {
            for (_, slot) in self.state.slots_mut(side).iter_mut() {
                slot.highlighted = false;
                slot.pending = None;
            }
        }
    }
}
