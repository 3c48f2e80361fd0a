//! Callbacks into the game that owns the battle.
//!
//! The engine reports how a battle ended through [`EndOfBattleHook`] and
//! offers a per-tick snapshot through [`BattleObserver`]. Neither can mutate
//! the battle.

use crate::view::BattleView;

/// Receives the battle outcome exactly once.
pub trait EndOfBattleHook {
    /// The opponent side ran out of combatants. `trainer` names the defeated
    /// trainer, or is `None` for a wild encounter.
    fn on_victory(&mut self, trainer: Option<&str>);

    /// The player side ran out of combatants.
    fn on_defeat(&mut self);
}

/// Hook that ignores the outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHook;

impl EndOfBattleHook for NoopHook {
    fn on_victory(&mut self, _trainer: Option<&str>) {}

    fn on_defeat(&mut self) {}
}

/// Render hook, called at the end of every tick.
pub trait BattleObserver {
    fn on_tick(&mut self, view: &BattleView);
}
