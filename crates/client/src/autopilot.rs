//! Menu driver standing in for a human player.

use battle_core::{BattleView, MenuInput, MenuOption, MenuOptions, SelectionMode};

/// Attacks with the first affordable ability on the first live target, and
/// defends when no attack is possible. Never switches or catches.
#[derive(Clone, Copy, Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Input for the next tick, or `None` while no menu is open.
    pub fn next_input(&self, view: &BattleView) -> Option<MenuInput> {
        let selection = &view.selection;
        match selection.mode {
            SelectionMode::None => None,
            SelectionMode::General => {
                let wanted = if selection.enabled.contains(MenuOptions::ATTACK) {
                    MenuOption::Attack
                } else {
                    MenuOption::Defend
                };
                if selection.general_option() == Some(wanted) {
                    Some(MenuInput::Confirm)
                } else {
                    Some(MenuInput::Down)
                }
            }
            SelectionMode::Attacks | SelectionMode::Target => Some(MenuInput::Confirm),
            SelectionMode::Switch => Some(MenuInput::Cancel),
        }
    }
}
