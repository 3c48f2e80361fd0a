//! Amount calculation: attack scaling, elemental affinity, mitigation.

use crate::config::BattleConfig;
use crate::env::{AbilityData, Element};

/// Raw amount before affinity and mitigation: `attack * power`.
pub fn base_amount(attack: f64, ability: &AbilityData) -> f64 {
    attack * ability.power
}

/// Fraction of the amount that gets through the target's defense.
///
/// # Formula
///
/// ```text
/// factor = clamp(1 - defense / 2000 - (0.2 if defending), 0, 1)
/// ```
pub fn defense_factor(defense: f64, defending: bool) -> f64 {
    let bonus = if defending {
        BattleConfig::DEFEND_BONUS
    } else {
        0.0
    };
    (1.0 - defense / BattleConfig::DEFENSE_DIVISOR - bonus).clamp(0.0, 1.0)
}

/// Final amount of `ability` used with `attack` against a target.
pub fn calculate_amount(
    attack: f64,
    ability: &AbilityData,
    target_element: Element,
    target_defense: f64,
    target_defending: bool,
) -> f64 {
    base_amount(attack, ability)
        * ability.element.multiplier_against(target_element)
        * defense_factor(target_defense, target_defending)
}
