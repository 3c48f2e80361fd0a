//! Static ability table.
//!
//! Abilities are a closed enumeration; every identifier resolves to a
//! `'static` [`AbilityData`] descriptor, so adding an ability is a compile-time
//! change that the exhaustive matches below will point out.

use super::Element;
use crate::state::Side;

/// Which side an ability targets, relative to the side using it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetSide {
    /// The user's own side (support abilities).
    Ally,
    /// The other side (offensive abilities).
    Opponent,
}

impl TargetSide {
    /// Resolves the relative side into an absolute one.
    pub const fn resolve(self, acting: Side) -> Side {
        match self {
            TargetSide::Ally => acting,
            TargetSide::Opponent => acting.opposite(),
        }
    }
}

/// How the resolved amount is applied to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Reduces the target's health.
    Damage,
    /// Restores the target's health.
    Heal,
}

/// Animation the renderer should play on the target slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AnimationCue {
    Scratch,
    Fire,
    Splash,
    Ice,
    Explosion,
    Green,
}

/// Static descriptor of an ability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityData {
    pub id: AbilityId,
    /// Multiplier applied to the user's attack stat.
    pub power: f64,
    /// Energy spent when the ability is committed.
    pub cost: f64,
    pub element: Element,
    pub target: TargetSide,
    pub effect: AbilityEffect,
    pub animation: AnimationCue,
}

impl AbilityData {
    const fn new(
        id: AbilityId,
        power: f64,
        cost: f64,
        element: Element,
        target: TargetSide,
        effect: AbilityEffect,
        animation: AnimationCue,
    ) -> Self {
        Self {
            id,
            power,
            cost,
            element,
            target,
            effect,
            animation,
        }
    }
}

/// Ability identifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityId {
    Scratch,
    Spark,
    Fire,
    Burn,
    Splash,
    Ice,
    Explosion,
    Annihilate,
    Heal,
    Battlecry,
}

use AbilityEffect::{Damage, Heal};
use TargetSide::{Ally, Opponent};

static ABILITIES: [AbilityData; 10] = [
    AbilityData::new(AbilityId::Scratch, 1.2, 20.0, Element::Normal, Opponent, Damage, AnimationCue::Scratch),
    AbilityData::new(AbilityId::Spark, 1.1, 20.0, Element::Fire, Opponent, Damage, AnimationCue::Fire),
    AbilityData::new(AbilityId::Fire, 2.0, 15.0, Element::Fire, Opponent, Damage, AnimationCue::Fire),
    AbilityData::new(AbilityId::Burn, 2.0, 15.0, Element::Fire, Opponent, Damage, AnimationCue::Fire),
    AbilityData::new(AbilityId::Splash, 2.0, 15.0, Element::Water, Opponent, Damage, AnimationCue::Splash),
    AbilityData::new(AbilityId::Ice, 2.0, 15.0, Element::Water, Opponent, Damage, AnimationCue::Ice),
    AbilityData::new(AbilityId::Explosion, 2.0, 90.0, Element::Fire, Opponent, Damage, AnimationCue::Explosion),
    AbilityData::new(AbilityId::Annihilate, 3.0, 30.0, Element::Fire, Opponent, Damage, AnimationCue::Explosion),
    AbilityData::new(AbilityId::Heal, 1.2, 600.0, Element::Plant, Ally, Heal, AnimationCue::Green),
    AbilityData::new(AbilityId::Battlecry, 1.4, 20.0, Element::Normal, Ally, Damage, AnimationCue::Green),
];

impl AbilityId {
    /// Returns the static descriptor for this ability.
    pub fn data(self) -> &'static AbilityData {
        &ABILITIES[self as usize]
    }

    pub fn cost(self) -> f64 {
        self.data().cost
    }

    pub fn target(self) -> TargetSide {
        self.data().target
    }
}
