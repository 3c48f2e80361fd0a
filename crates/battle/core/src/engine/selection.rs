//! Player menu navigation.
//!
//! ```text
//! NONE → GENERAL → ATTACKS → TARGET ─┐
//!                → SWITCH ───────────┤→ NONE
//!                → TARGET (catch) ───┘
//! ```
//!
//! Cancel returns to GENERAL from any submenu without ending the turn.
//! Every list is rebuilt from the state on each input, so cursors index the
//! same entries the renderer shows.

use strum::EnumCount;

use crate::monster::AbilityList;
use crate::state::{MenuInput, MenuOption, RosterIndex, SelectionMode, Side, SlotId};

use super::{BattleEngine, BattleError};

impl<'a> BattleEngine<'a> {
    /// Applies one menu input for the player combatant holding the turn.
    pub fn handle_input(&mut self, input: MenuInput) -> Result<(), BattleError> {
        let actor = self.player_actor()?;
        let mode = self.state.selection.mode;

        match input {
            MenuInput::Up => self.move_cursor(actor, -1),
            MenuInput::Down => self.move_cursor(actor, 1),
            MenuInput::Cancel => {
                if matches!(
                    mode,
                    SelectionMode::Attacks | SelectionMode::Switch | SelectionMode::Target
                ) {
                    tracing::debug!(%mode, "back to general");
                    self.state.selection.back_to_general();
                }
            }
            MenuInput::Confirm => self.confirm(actor)?,
        }
        Ok(())
    }

    /// Abilities the actor can pay for and aim at someone.
    pub fn attack_options(&self, actor: SlotId) -> AbilityList {
        let Some(monster) = self.state.monster(actor) else {
            return AbilityList::new();
        };
        monster
            .usable_abilities(true)
            .into_iter()
            .filter(|ability| {
                self.state
                    .has_live_combatants(ability.target().resolve(actor.side))
            })
            .collect()
    }

    /// Reserves the actor's side can switch in.
    pub fn switch_options(&self, actor: SlotId) -> Vec<RosterIndex> {
        self.state.eligible_reserves(actor.side)
    }

    /// Slots listed in TARGET mode.
    pub fn target_options(&self) -> Vec<SlotId> {
        self.state
            .selection
            .target_side
            .map(|side| self.state.live_slots(side))
            .unwrap_or_default()
    }

    /// Number of entries in the list the current mode navigates.
    pub fn menu_len(&self, actor: SlotId) -> usize {
        match self.state.selection.mode {
            SelectionMode::None => 0,
            SelectionMode::General => MenuOption::COUNT,
            SelectionMode::Attacks => self.attack_options(actor).len(),
            SelectionMode::Switch => self.switch_options(actor).len(),
            SelectionMode::Target => self.target_options().len(),
        }
    }

    fn player_actor(&self) -> Result<SlotId, BattleError> {
        match self.state.acting() {
            Some(actor) if actor.side == Side::Player && self.state.selection.is_open() => {
                Ok(actor)
            }
            _ => Err(BattleError::NoActiveCombatant),
        }
    }

    fn move_cursor(&mut self, actor: SlotId, delta: isize) {
        let len = self.menu_len(actor);
        let mode = self.state.selection.mode;
        self.state.selection.cursors.step(mode, delta, len);
    }

    fn confirm(&mut self, actor: SlotId) -> Result<(), BattleError> {
        let selection = self.state.selection;
        match selection.mode {
            SelectionMode::None => Err(BattleError::NoActiveCombatant),
            SelectionMode::General => self.confirm_general(actor),
            SelectionMode::Attacks => {
                let options = self.attack_options(actor);
                let cursor = selection.cursors.attacks;
                let ability = *options.get(cursor).ok_or_else(|| {
                    BattleError::invalid_selection(SelectionMode::Attacks, cursor, options.len())
                })?;

                let side = ability.target().resolve(actor.side);
                if !self.state.has_live_combatants(side) {
                    return Err(BattleError::EmptyTargetSet { side });
                }
                tracing::debug!(%ability, %side, "ability selected");
                let selection = &mut self.state.selection;
                selection.mode = SelectionMode::Target;
                selection.target_side = Some(side);
                selection.pending = Some(ability);
                Ok(())
            }
            SelectionMode::Switch => {
                let options = self.switch_options(actor);
                let cursor = selection.cursors.switch;
                let index = *options.get(cursor).ok_or_else(|| {
                    BattleError::invalid_selection(SelectionMode::Switch, cursor, options.len())
                })?;
                self.switch(actor, index)
            }
            SelectionMode::Target => {
                let options = self.target_options();
                let cursor = selection.cursors.target;
                let target = *options.get(cursor).ok_or_else(|| {
                    BattleError::invalid_selection(SelectionMode::Target, cursor, options.len())
                })?;
                match selection.pending {
                    Some(ability) => self.commit_attack(actor, ability, target),
                    None => self.catch(actor, target),
                }
            }
        }
    }

    fn confirm_general(&mut self, actor: SlotId) -> Result<(), BattleError> {
        let selection = self.state.selection;
        let option = selection
            .general_option()
            .ok_or_else(|| {
                BattleError::invalid_selection(
                    SelectionMode::General,
                    selection.cursors.general,
                    MenuOption::COUNT,
                )
            })?;
        if !selection.enabled.contains(option.flag()) {
            return Err(BattleError::OptionDisabled { option });
        }

        tracing::debug!(%option, "general option selected");
        match option {
            MenuOption::Attack => {
                self.state.selection.mode = SelectionMode::Attacks;
                Ok(())
            }
            MenuOption::Defend => self.defend(actor),
            MenuOption::Switch => {
                self.state.selection.mode = SelectionMode::Switch;
                Ok(())
            }
            MenuOption::Catch => {
                let side = actor.side.opposite();
                if !self.state.has_live_combatants(side) {
                    return Err(BattleError::EmptyTargetSet { side });
                }
                let selection = &mut self.state.selection;
                selection.mode = SelectionMode::Target;
                selection.target_side = Some(side);
                selection.pending = None;
                Ok(())
            }
        }
    }
}
