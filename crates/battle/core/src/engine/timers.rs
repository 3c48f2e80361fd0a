//! Deferred task dispatch.

use crate::env::RngOracle;
use crate::policy::{DecisionSeed, OpponentAction, OpponentPolicy};
use crate::state::{DeferredTask, SlotId};

use super::{BattleEngine, BattleError};

impl<'a> BattleEngine<'a> {
    /// Counts timers down by `dt_ms` and returns the tasks now due.
    pub fn due_tasks(&mut self, dt_ms: f64) -> Vec<DeferredTask> {
        self.state.timers.advance(dt_ms)
    }

    /// Runs one expired task.
    pub fn run_task(
        &mut self,
        task: DeferredTask,
        policy: &dyn OpponentPolicy,
        rng: &dyn RngOracle,
    ) -> Result<(), BattleError> {
        tracing::trace!(?task, "timer fired");
        match task {
            DeferredTask::OpponentTurn(slot) => self.run_opponent_turn(slot, policy, rng),
            DeferredTask::AttackImpact(slot) => self.resolve_impact(slot),
            DeferredTask::RemoveSlot(slot) => self.remove_slot(slot, true),
            DeferredTask::ClearHighlight(slot) => {
                if let Some(active) = self.state.slot_mut(slot) {
                    active.highlighted = false;
                }
                Ok(())
            }
            DeferredTask::ClearCatchBlocked => {
                self.state.catch_blocked = false;
                Ok(())
            }
        }
    }

    /// Asks the policy for a decision and carries it out.
    ///
    /// A decision the engine rejects falls back to defending so the turn is
    /// never left hanging.
    pub fn run_opponent_turn(
        &mut self,
        slot: SlotId,
        policy: &dyn OpponentPolicy,
        rng: &dyn RngOracle,
    ) -> Result<(), BattleError> {
        if self.state.acting() != Some(slot) {
            return Err(BattleError::NotActing { slot });
        }

        let seed = DecisionSeed {
            game_seed: self.config.seed,
            nonce: self.state.nonce,
            actor: slot,
        };
        self.state.nonce += 1;

        let action = policy.choose(slot, self.state, rng, seed);
        tracing::debug!(%slot, ?action, "opponent decided");
        match action {
            OpponentAction::Defend => self.defend(slot),
            OpponentAction::Attack { ability, target } => {
                match self.commit_attack(slot, ability, target) {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        tracing::warn!(%slot, %err, "opponent action rejected, defending");
                        self.defend(slot)
                    }
                }
            }
        }
    }
}
