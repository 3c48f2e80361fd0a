//! Opponent decision making.
//!
//! The default [`RandomPolicy`] picks uniformly between defending and every
//! affordable ability, then picks a uniformly random live target on the side
//! the ability aims at. All draws come from the [`RngOracle`], so a battle
//! replays identically from its seed.

use crate::env::{AbilityId, RngOracle, compute_seed};
use crate::state::{BattleState, SlotId};

/// What an opponent does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpponentAction {
    Defend,
    Attack { ability: AbilityId, target: SlotId },
}

/// Seed material for one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionSeed {
    pub game_seed: u64,
    pub nonce: u64,
    pub actor: SlotId,
}

impl DecisionSeed {
    /// Seed for the `context`-th draw of this decision.
    pub fn draw(&self, context: u32) -> u64 {
        compute_seed(self.game_seed, self.nonce, self.actor.code(), context)
    }
}

/// Chooses an action for an opponent combatant holding the turn.
pub trait OpponentPolicy {
    fn choose(
        &self,
        actor: SlotId,
        state: &BattleState,
        rng: &dyn RngOracle,
        seed: DecisionSeed,
    ) -> OpponentAction;
}

/// Uniform choice over `{defend} ∪ affordable abilities`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    const ACTION_DRAW: u32 = 0;
    const TARGET_DRAW: u32 = 1;
}

impl OpponentPolicy for RandomPolicy {
    fn choose(
        &self,
        actor: SlotId,
        state: &BattleState,
        rng: &dyn RngOracle,
        seed: DecisionSeed,
    ) -> OpponentAction {
        let Some(monster) = state.monster(actor) else {
            tracing::warn!(%actor, "policy asked to act for an empty slot, defending");
            return OpponentAction::Defend;
        };

        let abilities = monster.usable_abilities(true);
        // Index 0 is "defend", 1.. map onto `abilities`.
        let choice = rng
            .pick_index(seed.draw(Self::ACTION_DRAW), abilities.len() + 1)
            .unwrap_or(0);
        let Some(&ability) = choice.checked_sub(1).and_then(|i| abilities.get(i)) else {
            return OpponentAction::Defend;
        };

        let targets = state.live_slots(ability.target().resolve(actor.side));
        match rng
            .pick_index(seed.draw(Self::TARGET_DRAW), targets.len())
            .and_then(|i| targets.get(i))
        {
            Some(&target) => OpponentAction::Attack { ability, target },
            None => {
                tracing::warn!(%actor, %ability, "no targets for chosen ability, defending");
                OpponentAction::Defend
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, Species};
    use crate::monster::Monster;
    use crate::state::{Encounter, Roster, Side};

    fn state() -> BattleState {
        let player = Roster::from_monsters([
            Monster::new(Species::Finsta, 5),
            Monster::new(Species::Plumette, 5),
        ]);
        let opponent = Roster::from_monsters([Monster::new(Species::Sparchu, 10)]);
        let mut state = BattleState::new(player, opponent, Encounter::Wild);
        state.slots_mut(Side::Player).place(0, 0);
        state.slots_mut(Side::Player).place(1, 1);
        state.slots_mut(Side::Opponent).place(0, 0);
        state
    }

    fn seed(nonce: u64) -> DecisionSeed {
        DecisionSeed {
            game_seed: 11,
            nonce,
            actor: SlotId::opponent(0),
        }
    }

    #[test]
    fn choices_are_legal_and_cover_every_option() {
        let state = state();
        let actor = SlotId::opponent(0);
        let mut defended = false;
        let mut attacked = false;

        for nonce in 0..200 {
            match RandomPolicy.choose(actor, &state, &PcgRng, seed(nonce)) {
                OpponentAction::Defend => defended = true,
                OpponentAction::Attack { ability, target } => {
                    attacked = true;
                    assert!(state.monster(actor).unwrap().usable_abilities(true).contains(&ability));
                    let side = ability.target().resolve(Side::Opponent);
                    assert!(state.live_slots(side).contains(&target));
                }
            }
        }
        assert!(defended && attacked);
    }

    #[test]
    fn same_seed_same_choice() {
        let state = state();
        let actor = SlotId::opponent(0);
        assert_eq!(
            RandomPolicy.choose(actor, &state, &PcgRng, seed(3)),
            RandomPolicy.choose(actor, &state, &PcgRng, seed(3))
        );
    }

    #[test]
    fn broke_monster_defends() {
        let mut state = state();
        state.monster_mut(SlotId::opponent(0)).unwrap().energy = 0.0;
        for nonce in 0..20 {
            assert_eq!(
                RandomPolicy.choose(SlotId::opponent(0), &state, &PcgRng, seed(nonce)),
                OpponentAction::Defend
            );
        }
    }
}
