//! Attack resolution between two monsters.

use crate::env::{AbilityEffect, AbilityId};
use crate::monster::Monster;

use super::damage::calculate_amount;

/// Outcome of resolving one ability against one target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub ability: AbilityId,
    pub effect: AbilityEffect,
    /// Elemental multiplier that was applied.
    pub multiplier: f64,
    /// Health removed (damage) or restored (heal), before clamping.
    pub amount: f64,
}

/// Computes what `ability` used by `source` does to `target`.
///
/// Pure: neither monster is modified. Heal abilities go through the same
/// affinity and mitigation steps as damage.
pub fn resolve_attack(source: &Monster, target: &Monster, ability: AbilityId) -> AttackResult {
    let data = ability.data();
    let target_stats = target.stats();
    AttackResult {
        ability,
        effect: data.effect,
        multiplier: data.element.multiplier_against(target.element()),
        amount: calculate_amount(
            source.stats().attack,
            data,
            target.element(),
            target_stats.defense,
            target.defending,
        ),
    }
}

/// Applies a resolved result to its target.
pub fn apply_result(target: &mut Monster, result: &AttackResult) {
    match result.effect {
        AbilityEffect::Damage => target.apply_damage(result.amount),
        AbilityEffect::Heal => target.heal(result.amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Species;

    #[test]
    fn defending_target_takes_less() {
        let source = Monster::new(Species::Sparchu, 10);
        let mut target = Monster::new(Species::Finsta, 10);

        let open = resolve_attack(&source, &target, AbilityId::Scratch);
        target.defending = true;
        let guarded = resolve_attack(&source, &target, AbilityId::Scratch);

        assert!(guarded.amount < open.amount);
        assert_eq!(open.multiplier, 1.0);
    }

    #[test]
    fn heal_restores_health() {
        let source = Monster::new(Species::Sparchu, 15);
        let mut target = Monster::new(Species::Finsta, 10);
        target.health = 10.0;

        let result = resolve_attack(&source, &target, AbilityId::Heal);
        assert_eq!(result.effect, AbilityEffect::Heal);
        apply_result(&mut target, &result);
        assert!(target.health > 10.0);
    }

    #[test]
    fn battlecry_hurts_the_ally_it_targets() {
        let source = Monster::new(Species::Sparchu, 15);
        let mut ally = Monster::new(Species::Finsta, 10);
        ally.health = 50.0;

        let result = resolve_attack(&source, &ally, AbilityId::Battlecry);
        assert_eq!(result.effect, AbilityEffect::Damage);
        apply_result(&mut ally, &result);
        assert!(ally.health < 50.0);
    }
}
