//! Committed actions and their consequences: attacks, defend, switch,
//! catch, faints, experience and replacements.

use crate::combat::{apply_result, resolve_attack};
use crate::config::BattleConfig;
use crate::env::AbilityId;
use crate::event::{BattleEvent, SoundCue};
use crate::state::{DeferredTask, PendingAttack, RosterIndex, Side, SlotId, SlotStatus};

use super::{BattleEngine, BattleError};

impl<'a> BattleEngine<'a> {
    /// Pays for `ability` and sends it at `target`.
    ///
    /// Energy is spent immediately; the effect lands when the impact timer
    /// fires. The turn stays held until then.
    pub fn commit_attack(
        &mut self,
        actor: SlotId,
        ability: AbilityId,
        target: SlotId,
    ) -> Result<(), BattleError> {
        self.ensure_acting(actor)?;
        if !self.attack_options(actor).contains(&ability) {
            return Err(BattleError::AbilityUnavailable {
                slot: actor,
                ability,
            });
        }
        if target.side != ability.target().resolve(actor.side)
            || !self.state.live_slots(target.side).contains(&target)
        {
            return Err(BattleError::InvalidTarget { target });
        }

        self.state
            .monster_mut(actor)
            .ok_or(BattleError::EmptySlot { slot: actor })?
            .spend_energy(ability.cost());
        if let Some(slot) = self.state.slot_mut(actor) {
            slot.pending = Some(PendingAttack { ability, target });
        }

        tracing::debug!(%actor, %ability, %target, "ability committed");
        self.state.emit(BattleEvent::AbilityUsed {
            source: actor,
            target,
            ability,
            animation: ability.data().animation,
        });

        if actor.side == Side::Player {
            self.state.selection.close();
        }
        self.state
            .timers
            .schedule(self.config.attack_impact_ms, DeferredTask::AttackImpact(actor));
        Ok(())
    }

    /// Lands the attack committed by `source`, then checks for faints and
    /// ends the turn.
    pub fn resolve_impact(&mut self, source: SlotId) -> Result<(), BattleError> {
        let pending = self
            .state
            .slot_mut(source)
            .and_then(|slot| slot.pending.take())
            .ok_or(BattleError::NoPendingAttack { slot: source })?;
        let target = pending.target;

        let target_fighting = self
            .state
            .slot(target)
            .is_some_and(|slot| !slot.is_leaving());
        let result = match (self.state.monster(source), self.state.monster(target)) {
            (Some(attacker), Some(defender)) if target_fighting => {
                Some(resolve_attack(attacker, defender, pending.ability))
            }
            _ => None,
        };

        match result {
            Some(result) => {
                if let Some(defender) = self.state.monster_mut(target) {
                    apply_result(defender, &result);
                }
                if let Some(slot) = self.state.slot_mut(target) {
                    slot.highlighted = true;
                }
                self.state
                    .timers
                    .schedule(self.config.highlight_ms, DeferredTask::ClearHighlight(target));

                tracing::debug!(
                    %source,
                    %target,
                    ability = %pending.ability,
                    amount = result.amount,
                    multiplier = result.multiplier,
                    "impact"
                );
                self.state.emit(BattleEvent::Impact {
                    source,
                    target,
                    ability: pending.ability,
                    effect: result.effect,
                    amount: result.amount,
                    multiplier: result.multiplier,
                });
                self.state.emit(BattleEvent::Sound(SoundCue::Impact));
                self.check_faints();
            }
            None => tracing::warn!(%source, %target, "target left before impact"),
        }

        self.end_turn(source)
    }

    /// Raises the actor's guard until its next turn and ends the turn.
    pub fn defend(&mut self, actor: SlotId) -> Result<(), BattleError> {
        self.ensure_acting(actor)?;
        self.state
            .monster_mut(actor)
            .ok_or(BattleError::EmptySlot { slot: actor })?
            .defending = true;

        tracing::debug!(%actor, "defending");
        self.state.emit(BattleEvent::Defended { slot: actor });
        self.end_turn(actor)
    }

    /// Replaces the actor with reserve `index` at the same position and ends
    /// the turn. No other slot changes.
    pub fn switch(&mut self, actor: SlotId, index: RosterIndex) -> Result<(), BattleError> {
        self.ensure_acting(actor)?;
        if !self.state.eligible_reserves(actor.side).contains(&index) {
            return Err(BattleError::IneligibleReserve { index });
        }

        let previous = self
            .state
            .slots_mut(actor.side)
            .place(actor.position, index)
            .ok_or(BattleError::EmptySlot { slot: actor })?;

        tracing::info!(%actor, from = previous.roster_index, to = index, "switched");
        self.state.emit(BattleEvent::Switched {
            slot: actor,
            from: previous.roster_index,
            to: index,
        });
        self.emit_sent_out(actor);
        self.end_turn(actor)
    }

    /// Tries to catch the opponent in `target` and ends the turn.
    ///
    /// Succeeds when the target's health is below 90% of its maximum: the slot
    /// is marked caught and cleared after the removal delay. Otherwise the
    /// blocked cue is shown for a while.
    pub fn catch(&mut self, actor: SlotId, target: SlotId) -> Result<(), BattleError> {
        self.ensure_acting(actor)?;
        if !self.state.encounter.is_wild() {
            return Err(BattleError::OptionDisabled {
                option: crate::state::MenuOption::Catch,
            });
        }
        if target.side == actor.side || !self.state.live_slots(target.side).contains(&target) {
            return Err(BattleError::InvalidTarget { target });
        }

        let monster = self
            .state
            .monster(target)
            .ok_or(BattleError::EmptySlot { slot: target })?;
        let species = monster.species();

        if monster.health < monster.max_health() * BattleConfig::CATCH_HEALTH_RATIO {
            if let Some(slot) = self.state.slot_mut(target) {
                slot.status = SlotStatus::Caught;
                slot.pending = None;
            }
            tracing::info!(%target, %species, "caught");
            self.state.emit(BattleEvent::Caught {
                slot: target,
                species,
            });
            self.state.emit(BattleEvent::Sound(SoundCue::Catch));
            self.state
                .timers
                .schedule(self.config.removal_delay_ms, DeferredTask::RemoveSlot(target));
        } else {
            tracing::info!(%target, %species, "catch blocked");
            self.state.catch_blocked = true;
            self.state.emit(BattleEvent::CatchBlocked { slot: target });
            self.state
                .timers
                .schedule(self.config.catch_blocked_ms, DeferredTask::ClearCatchBlocked);
        }

        self.end_turn(actor)
    }

    /// Marks every fighting combatant at zero health as fainting and
    /// schedules its removal. Opponent faints pay experience to the player's
    /// surviving combatants.
    pub fn check_faints(&mut self) {
        for side in [Side::Opponent, Side::Player] {
            let fainted: Vec<SlotId> = self
                .state
                .slots(side)
                .iter()
                .filter(|(_, slot)| !slot.is_leaving())
                .map(|(position, _)| SlotId::new(side, position))
                .filter(|id| self.state.monster(*id).is_some_and(|m| !m.is_alive()))
                .collect();

            for slot in fainted {
                self.faint(slot);
            }
        }
    }

    fn faint(&mut self, slot: SlotId) {
        let Some((species, level)) = self
            .state
            .monster(slot)
            .map(|monster| (monster.species(), monster.level()))
        else {
            return;
        };
        if let Some(active) = self.state.slot_mut(slot) {
            active.status = SlotStatus::Fainting;
            active.pending = None;
        }

        tracing::info!(%slot, %species, level, "fainted");
        self.state.emit(BattleEvent::Fainted { slot, species });
        self.state.emit(BattleEvent::Sound(SoundCue::Faint));
        self.state
            .timers
            .schedule(self.config.removal_delay_ms, DeferredTask::RemoveSlot(slot));

        if slot.side == Side::Opponent {
            self.award_experience(level);
        }
    }

    /// Splits `level * 100` experience evenly between surviving player
    /// combatants.
    fn award_experience(&mut self, fainted_level: u32) {
        let survivors = self.state.live_slots(Side::Player);
        if survivors.is_empty() {
            return;
        }
        let amount =
            fainted_level as f64 * BattleConfig::XP_AWARD_PER_LEVEL / survivors.len() as f64;

        for slot in survivors {
            let Some(monster) = self.state.monster_mut(slot) else {
                continue;
            };
            let leveled_up = monster.gain_experience(amount);
            let level = monster.level();

            self.state.emit(BattleEvent::ExperienceGained {
                slot,
                amount,
                level,
                leveled_up,
            });
            if leveled_up {
                tracing::info!(%slot, level, "level up");
                self.state.emit(BattleEvent::Sound(SoundCue::LevelUp));
            }
        }
    }

    /// Clears a leaving slot. A caught occupant joins the player roster.
    /// With `replace`, the lowest-index eligible reserve takes the position.
    pub fn remove_slot(&mut self, slot: SlotId, replace: bool) -> Result<(), BattleError> {
        let Some(cleared) = self.state.slots_mut(slot.side).clear(slot.position) else {
            return Ok(());
        };
        self.state.emit(BattleEvent::SlotCleared { slot });

        if cleared.status == SlotStatus::Caught {
            let mut monster = self
                .state
                .roster_mut(slot.side)
                .remove(cleared.roster_index)?;
            monster.initiative = 0.0;
            monster.defending = false;
            let species = monster.species();
            let roster_index = self
                .state
                .roster_mut(slot.side.opposite())
                .insert_next(monster);

            tracing::info!(%species, roster_index, "joined player roster");
            self.state.emit(BattleEvent::JoinedRoster {
                roster_index,
                species,
            });
        }

        if replace {
            if let Some(&index) = self.state.eligible_reserves(slot.side).first() {
                self.state.slots_mut(slot.side).place(slot.position, index);
                self.emit_sent_out(slot);
            }
        }
        Ok(())
    }

    fn emit_sent_out(&mut self, slot: SlotId) {
        let Some(roster_index) = self.state.slot(slot).map(|active| active.roster_index) else {
            return;
        };
        if let Some(species) = self.state.monster(slot).map(|monster| monster.species()) {
            tracing::debug!(%slot, roster_index, %species, "sent out");
            self.state.emit(BattleEvent::SentOut {
                slot,
                roster_index,
                species,
            });
        }
    }

    fn ensure_acting(&self, slot: SlotId) -> Result<(), BattleError> {
        if self.state.acting() != Some(slot) {
            return Err(BattleError::NotActing { slot });
        }
        Ok(())
    }

    /// Releases the turn held by `actor` and closes its menu.
    fn end_turn(&mut self, actor: SlotId) -> Result<(), BattleError> {
        if actor.side == Side::Player {
            self.state.selection.close();
        }
        self.state.turn.release(actor)?;
        tracing::trace!(%actor, "turn ended");
        Ok(())
    }
}
