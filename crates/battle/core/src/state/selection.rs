//! Player menu state.

use bitflags::bitflags;

use super::Side;
use crate::env::AbilityId;

/// Which menu the player is navigating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SelectionMode {
    /// No player turn in progress.
    #[default]
    None,
    /// Top-level menu: attack, defend, switch, catch.
    General,
    /// Choosing an ability.
    Attacks,
    /// Choosing a reserve to send out.
    Switch,
    /// Choosing a target slot for the pending ability or a catch.
    Target,
}

/// Entries of the general menu, in display order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MenuOption {
    Attack,
    Defend,
    Switch,
    Catch,
}

impl MenuOption {
    pub const fn flag(self) -> MenuOptions {
        match self {
            MenuOption::Attack => MenuOptions::ATTACK,
            MenuOption::Defend => MenuOptions::DEFEND,
            MenuOption::Switch => MenuOptions::SWITCH,
            MenuOption::Catch => MenuOptions::CATCH,
        }
    }
}

bitflags! {
    /// Set of general-menu entries that can currently be confirmed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MenuOptions: u8 {
        const ATTACK = 1 << 0;
        const DEFEND = 1 << 1;
        const SWITCH = 1 << 2;
        const CATCH = 1 << 3;
    }
}

/// Player input for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MenuInput {
    Up,
    Down,
    Confirm,
    Cancel,
}

/// Per-menu cursor positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursors {
    pub general: usize,
    pub attacks: usize,
    pub switch: usize,
    pub target: usize,
}

impl Cursors {
    pub fn get(&self, mode: SelectionMode) -> Option<usize> {
        match mode {
            SelectionMode::None => None,
            SelectionMode::General => Some(self.general),
            SelectionMode::Attacks => Some(self.attacks),
            SelectionMode::Switch => Some(self.switch),
            SelectionMode::Target => Some(self.target),
        }
    }

    fn slot_mut(&mut self, mode: SelectionMode) -> Option<&mut usize> {
        match mode {
            SelectionMode::None => None,
            SelectionMode::General => Some(&mut self.general),
            SelectionMode::Attacks => Some(&mut self.attacks),
            SelectionMode::Switch => Some(&mut self.switch),
            SelectionMode::Target => Some(&mut self.target),
        }
    }

    /// Moves the cursor of `mode` by `delta`, wrapping modulo `len`.
    pub fn step(&mut self, mode: SelectionMode, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        if let Some(cursor) = self.slot_mut(mode) {
            let current = (*cursor % len) as isize;
            *cursor = (current + delta).rem_euclid(len as isize) as usize;
        }
    }
}

/// Everything the menu renderer needs besides the battle itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionState {
    pub mode: SelectionMode,
    /// Side whose slots are listed in TARGET mode.
    pub target_side: Option<Side>,
    /// Ability picked in ATTACKS, awaiting a target. `None` in TARGET means catch.
    pub pending: Option<AbilityId>,
    pub cursors: Cursors,
    /// General-menu entries that can be confirmed this turn.
    pub enabled: MenuOptions,
}

impl SelectionState {
    /// Opens the general menu for a new player turn.
    pub fn open(&mut self, enabled: MenuOptions) {
        self.mode = SelectionMode::General;
        self.target_side = None;
        self.pending = None;
        self.enabled = enabled;
    }

    /// Returns to GENERAL, keeping cursors.
    pub fn back_to_general(&mut self) {
        self.mode = SelectionMode::General;
        self.target_side = None;
        self.pending = None;
    }

    /// Closes the menu after a commitment and resets every cursor.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.mode != SelectionMode::None
    }

    /// General-menu entry under the cursor.
    pub fn general_option(&self) -> Option<MenuOption> {
        use strum::EnumCount;
        MenuOption::from_repr(self.cursors.general % MenuOption::COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut cursors = Cursors::default();
        cursors.step(SelectionMode::Attacks, -1, 3);
        assert_eq!(cursors.attacks, 2);
        cursors.step(SelectionMode::Attacks, 1, 3);
        assert_eq!(cursors.attacks, 0);

        cursors.step(SelectionMode::None, 1, 3);
        cursors.step(SelectionMode::Target, 1, 0);
        assert_eq!(cursors, Cursors::default());
    }

    #[test]
    fn stale_cursor_is_folded_into_range() {
        let mut cursors = Cursors {
            switch: 7,
            ..Cursors::default()
        };
        cursors.step(SelectionMode::Switch, 1, 2);
        assert_eq!(cursors.switch, 0);
    }

    #[test]
    fn back_to_general_keeps_cursors_close_resets() {
        let mut selection = SelectionState::default();
        selection.open(MenuOptions::all());
        selection.mode = SelectionMode::Target;
        selection.pending = Some(AbilityId::Scratch);
        selection.cursors.attacks = 2;

        selection.back_to_general();
        assert_eq!(selection.mode, SelectionMode::General);
        assert_eq!(selection.pending, None);
        assert_eq!(selection.cursors.attacks, 2);

        selection.close();
        assert_eq!(selection, SelectionState::default());
    }

    #[test]
    fn general_option_follows_cursor() {
        let mut selection = SelectionState::default();
        selection.cursors.general = 3;
        assert_eq!(selection.general_option(), Some(MenuOption::Catch));
        assert!(MenuOption::Switch.flag().intersects(MenuOptions::SWITCH));
    }
}
